use std::collections::HashSet;

use crate::entities::blog_post::BlogPost;

pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Picks up to `limit` posts topically close to the post at `slug`.
///
/// Posts are scored by the number of tags they share with the reference
/// post (case-insensitive). Scored posts come first, highest score then
/// newest first; any remaining slots are filled with the most recent
/// unselected posts. The reference post never appears in its own result,
/// and an unknown slug yields nothing.
pub fn rank_related_posts(posts: &[BlogPost], slug: &str, limit: usize) -> Vec<BlogPost> {
    let Some(current) = posts.iter().find(|p| p.slug == slug) else {
        return Vec::new();
    };
    if limit == 0 {
        return Vec::new();
    }

    let mut recent: Vec<&BlogPost> = posts.iter().filter(|p| p.slug != slug).collect();
    recent.sort_by(|a, b| b.published_date.cmp(&a.published_date));

    let current_tags = normalized_tags(current);
    if current_tags.is_empty() {
        return recent.into_iter().take(limit).cloned().collect();
    }

    let mut scored: Vec<(usize, &BlogPost)> = recent
        .iter()
        .map(|post| (normalized_tags(post).intersection(&current_tags).count(), *post))
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .cmp(score_a)
            .then_with(|| b.published_date.cmp(&a.published_date))
    });

    let mut related: Vec<&BlogPost> = scored.into_iter().take(limit).map(|(_, post)| post).collect();

    if related.len() < limit {
        let chosen: HashSet<&str> = related.iter().map(|p| p.slug.as_str()).collect();
        let filler: Vec<&BlogPost> = recent
            .into_iter()
            .filter(|p| !chosen.contains(p.slug.as_str()))
            .take(limit - related.len())
            .collect();
        related.extend(filler);
    }

    related.into_iter().cloned().collect()
}

fn normalized_tags(post: &BlogPost) -> HashSet<String> {
    post.tags.iter().map(|t| t.to_lowercase()).collect()
}
