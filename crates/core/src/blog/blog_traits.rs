//! Blog repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::blog_model::{BlogPost, BlogPostDetail, BlogPostFilters, FeedItem, NewBlogPost};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

/// Persistence contract for blog posts.
///
/// "Visible" always means published with a publish date at or before `now`;
/// the service passes the clock so the rule stays testable.
#[async_trait]
pub trait BlogRepositoryTrait: Send + Sync {
    /// Visible posts matching the filters, ordered by
    /// (-published_date, -created_at).
    fn list_visible(
        &self,
        filters: &BlogPostFilters,
        pagination: Pagination,
        now: NaiveDateTime,
    ) -> Result<Page<BlogPost>>;

    /// Visible post by slug.
    fn get_visible_by_slug(&self, slug: &str, now: NaiveDateTime) -> Result<BlogPost>;

    /// Visible featured posts, newest first.
    fn list_featured(&self, limit: i64, now: NaiveDateTime) -> Result<Vec<BlogPost>>;

    /// Visible posts newest first, optionally excluding one post.
    fn list_recent(
        &self,
        limit: i64,
        exclude_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>>;

    /// Visible posts in the given category, excluding one post.
    fn list_same_category(
        &self,
        category: &str,
        exclude_id: &str,
        limit: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>>;

    /// Visible posts whose tags field contains the tag, case-insensitively,
    /// excluding one post.
    fn list_with_tag(
        &self,
        tag: &str,
        exclude_id: &str,
        limit: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>>;

    /// Bumps the view counter. Last write wins; no locking.
    async fn increment_view_count(&self, id: &str) -> Result<()>;

    async fn create(&self, post: NewBlogPost) -> Result<BlogPost>;
    async fn delete(&self, id: &str) -> Result<usize>;
}

/// Business operations over blog posts.
#[async_trait]
pub trait BlogServiceTrait: Send + Sync {
    fn list_posts(&self, filters: BlogPostFilters, page: i64) -> Result<Page<BlogPost>>;

    /// Featured posts for the list sidebar (limit 3).
    fn featured_posts(&self) -> Result<Vec<BlogPost>>;

    /// Recent posts for sidebars (limit 5).
    fn recent_posts(&self) -> Result<Vec<BlogPost>>;

    /// Post detail: bumps the view count and assembles related posts
    /// (same category first, then shared tags, deduplicated, cap 3).
    async fn get_post(&self, slug: &str) -> Result<BlogPostDetail>;

    /// Last 20 visible posts as feed entries, newest first.
    fn feed_items(&self) -> Result<Vec<FeedItem>>;

    async fn create_post(&self, post: NewBlogPost) -> Result<BlogPost>;
    async fn delete_post(&self, id: &str) -> Result<()>;
}
