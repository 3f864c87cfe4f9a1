use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Declaration order is display rank: expert first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proficiency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Expert,
    Advanced,
    Intermediate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub category_slug: String,
    pub proficiency: Proficiency,
    pub sort_order: i32,
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillFrontMatter {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub category: String,

    pub category_slug: Option<String>,

    pub proficiency: Proficiency,

    #[serde(default, rename = "order")]
    pub sort_order: i32,
}

#[derive(Debug, Serialize)]
pub struct SkillCategory {
    pub name: String,
    pub slug: String,
    pub skills: Vec<Skill>,
}

impl SkillFrontMatter {
    pub fn into_skill(self, body: String) -> Skill {
        let category_slug = self
            .category_slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slug::slugify(&self.category));

        Skill {
            id: None,
            name: self.name,
            category: self.category,
            category_slug,
            proficiency: self.proficiency,
            sort_order: self.sort_order,
            body,
        }
    }
}

/// Orders skills by proficiency, expert first, then name.
pub fn sort_skills(skills: &mut [Skill]) {
    skills.sort_by(|a, b| {
        a.proficiency
            .cmp(&b.proficiency)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Category name, then order within the category, then skill name.
pub fn sort_by_category(skills: &mut [Skill]) {
    skills.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then(a.sort_order.cmp(&b.sort_order))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Groups an ordered skill list by category, preserving order.
pub fn group_by_category(skills: Vec<Skill>) -> Vec<SkillCategory> {
    let mut groups: Vec<SkillCategory> = Vec::new();
    for skill in skills {
        match groups.iter_mut().find(|g| g.slug == skill.category_slug) {
            Some(group) => group.skills.push(skill),
            None => groups.push(SkillCategory {
                name: skill.category.clone(),
                slug: skill.category_slug.clone(),
                skills: vec![skill],
            }),
        }
    }
    groups
}
