use async_trait::async_trait;

use crate::{
    entities::{
        blog_post::BlogPost,
        certification::Certification,
        experience::Experience,
        project::Project,
        singletons::{AboutContent, NowContent, UsesContent},
        skill::Skill,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxSeedStore,
    use_cases::seed::SeedStore,
};

#[async_trait]
impl SeedStore for SqlxSeedStore {
    async fn upsert_project(&self, project: &Project, position: i32) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                title, description, slug, featured, sort_order, tech_stack, github, private,
                live_url, image, challenge, approach, impact, learnings, body, source_position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (slug) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                featured = EXCLUDED.featured,
                sort_order = EXCLUDED.sort_order,
                tech_stack = EXCLUDED.tech_stack,
                github = EXCLUDED.github,
                private = EXCLUDED.private,
                live_url = EXCLUDED.live_url,
                image = EXCLUDED.image,
                challenge = EXCLUDED.challenge,
                approach = EXCLUDED.approach,
                impact = EXCLUDED.impact,
                learnings = EXCLUDED.learnings,
                body = EXCLUDED.body,
                source_position = EXCLUDED.source_position,
                updated_at = NOW()
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.slug)
        .bind(project.featured)
        .bind(project.sort_order)
        .bind(&project.tech_stack)
        .bind(&project.github)
        .bind(project.private)
        .bind(&project.live_url)
        .bind(&project.image)
        .bind(&project.challenge)
        .bind(&project.approach)
        .bind(&project.impact)
        .bind(&project.learnings)
        .bind(&project.body)
        .bind(position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_experience(&self, experience: &Experience, position: i32) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO experiences (
                company, role, start_date, end_date, location, sort_order, body, source_position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (company, role, start_date) DO UPDATE SET
                end_date = EXCLUDED.end_date,
                location = EXCLUDED.location,
                sort_order = EXCLUDED.sort_order,
                body = EXCLUDED.body,
                source_position = EXCLUDED.source_position,
                updated_at = NOW()
            "#,
        )
        .bind(&experience.company)
        .bind(&experience.role)
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(&experience.location)
        .bind(experience.sort_order)
        .bind(&experience.body)
        .bind(position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_blog_post(&self, post: &BlogPost, position: i32) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts (
                title, description, slug, published_date, updated_date, tags, featured,
                reading_time, body, source_position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (slug) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                published_date = EXCLUDED.published_date,
                updated_date = EXCLUDED.updated_date,
                tags = EXCLUDED.tags,
                featured = EXCLUDED.featured,
                reading_time = EXCLUDED.reading_time,
                body = EXCLUDED.body,
                source_position = EXCLUDED.source_position,
                updated_at = NOW()
            "#,
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.slug)
        .bind(post.published_date)
        .bind(post.updated_date)
        .bind(&post.tags)
        .bind(post.featured)
        .bind(post.reading_time)
        .bind(&post.body)
        .bind(position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_skill(&self, skill: &Skill) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO skills (name, category, category_slug, proficiency, sort_order, body)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO UPDATE SET
                category = EXCLUDED.category,
                category_slug = EXCLUDED.category_slug,
                proficiency = EXCLUDED.proficiency,
                sort_order = EXCLUDED.sort_order,
                body = EXCLUDED.body,
                updated_at = NOW()
            "#,
        )
        .bind(&skill.name)
        .bind(&skill.category)
        .bind(&skill.category_slug)
        .bind(skill.proficiency)
        .bind(skill.sort_order)
        .bind(&skill.body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_now(&self, now: &NowContent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO now_content (title, last_updated, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (singleton) DO UPDATE SET
                title = EXCLUDED.title,
                last_updated = EXCLUDED.last_updated,
                body = EXCLUDED.body,
                updated_at = NOW()
            "#,
        )
        .bind(&now.title)
        .bind(now.last_updated)
        .bind(&now.body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_about(&self, about: &AboutContent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO about_content (
                title, description, "current_role", current_company, location, focus_areas, body
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (singleton) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                "current_role" = EXCLUDED."current_role",
                current_company = EXCLUDED.current_company,
                location = EXCLUDED.location,
                focus_areas = EXCLUDED.focus_areas,
                body = EXCLUDED.body,
                updated_at = NOW()
            "#,
        )
        .bind(&about.title)
        .bind(&about.description)
        .bind(&about.current_role)
        .bind(&about.current_company)
        .bind(&about.location)
        .bind(&about.focus_areas)
        .bind(&about.body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_uses(&self, uses: &UsesContent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO uses_content (title, body)
            VALUES ($1, $2)
            ON CONFLICT (singleton) DO UPDATE SET
                title = EXCLUDED.title,
                body = EXCLUDED.body,
                updated_at = NOW()
            "#,
        )
        .bind(&uses.title)
        .bind(&uses.body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert_certification(&self, certification: &Certification) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO certifications (name, abbreviation, issuer)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET
                abbreviation = EXCLUDED.abbreviation,
                issuer = EXCLUDED.issuer,
                updated_at = NOW()
            "#,
        )
        .bind(&certification.name)
        .bind(&certification.abbreviation)
        .bind(&certification.issuer)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
