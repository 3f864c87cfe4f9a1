use async_trait::async_trait;

use crate::{
    entities::blog_post::BlogPost,
    errors::AppError,
    repositories::{collect_blog_tags, sqlx_repo::SqlxContentRepo},
};

const BLOG_POST_COLUMNS: &str = "id, title, description, slug, published_date, updated_date, \
    tags, featured, reading_time, body";

// `source_position` is the file order recorded at seed time.
const BLOG_POST_ORDER: &str = "ORDER BY published_date DESC, source_position ASC, slug ASC";

#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// All posts, newest first; ties keep input order.
    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;

    /// Featured posts, newest first.
    async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;

    /// Distinct lower-cased tags, sorted.
    async fn get_all_blog_tags(&self) -> Result<Vec<String>, AppError>;

    /// Posts carrying `tag` under case-insensitive comparison, newest first.
    async fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError>;
}

#[async_trait]
impl BlogPostRepository for SqlxContentRepo {
    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts {BLOG_POST_ORDER}"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn get_featured_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE featured = TRUE {BLOG_POST_ORDER}"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE slug = $1 LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn get_all_blog_tags(&self) -> Result<Vec<String>, AppError> {
        let tag_lists: Vec<Vec<String>> = sqlx::query_scalar("SELECT tags FROM blog_posts")
            .fetch_all(&self.pool)
            .await?;

        Ok(collect_blog_tags(tag_lists.iter().map(Vec::as_slice)))
    }

    async fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, AppError> {
        // Filtered here rather than in SQL so case folding matches the static source.
        let posts = self.get_blog_posts().await?;

        Ok(posts.into_iter().filter(|post| post.has_tag_ignore_case(tag)).collect())
    }
}
