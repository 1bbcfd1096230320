use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use log::debug;

use super::blog_model::{BlogPost, BlogPostDetail, BlogPostFilters, FeedItem, NewBlogPost};
use super::blog_traits::{BlogRepositoryTrait, BlogServiceTrait};
use crate::constants::{BLOG_PAGE_SIZE, FEATURED_LIMIT, FEED_ITEM_LIMIT, RECENT_POSTS_LIMIT, RELATED_LIMIT};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

/// Service for blog posts.
pub struct BlogService {
    repository: Arc<dyn BlogRepositoryTrait>,
}

impl BlogService {
    pub fn new(repository: Arc<dyn BlogRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    /// Related posts: up to two from the same category, then up to two
    /// sharing any tag, deduplicated preserving order, capped at three.
    fn related_posts(&self, post: &BlogPost, now: NaiveDateTime) -> Result<Vec<BlogPost>> {
        let mut candidates = self.repository.list_same_category(
            post.category.as_str(),
            &post.id,
            2,
            now,
        )?;

        // The tag cap applies across all tags, not per tag. Each per-tag
        // fetch is already newest-first, so re-sorting the merged set keeps
        // the two newest tag matches overall.
        let mut tag_matches: Vec<BlogPost> = Vec::new();
        let mut tag_seen: HashSet<String> = HashSet::new();
        for tag in post.tags_list() {
            for candidate in self.repository.list_with_tag(&tag, &post.id, 2, now)? {
                if tag_seen.insert(candidate.id.clone()) {
                    tag_matches.push(candidate);
                }
            }
        }
        tag_matches.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        tag_matches.truncate(2);
        candidates.extend(tag_matches);

        let mut seen: HashSet<String> = HashSet::new();
        let mut related = Vec::new();
        for candidate in candidates {
            if seen.insert(candidate.id.clone()) {
                related.push(candidate);
            }
            if related.len() == RELATED_LIMIT {
                break;
            }
        }
        Ok(related)
    }
}

#[async_trait::async_trait]
impl BlogServiceTrait for BlogService {
    fn list_posts(&self, filters: BlogPostFilters, page: i64) -> Result<Page<BlogPost>> {
        self.repository
            .list_visible(&filters, Pagination::new(page, BLOG_PAGE_SIZE), Self::now())
    }

    fn featured_posts(&self) -> Result<Vec<BlogPost>> {
        self.repository.list_featured(FEATURED_LIMIT, Self::now())
    }

    fn recent_posts(&self) -> Result<Vec<BlogPost>> {
        self.repository.list_recent(RECENT_POSTS_LIMIT, None, Self::now())
    }

    async fn get_post(&self, slug: &str) -> Result<BlogPostDetail> {
        let now = Self::now();
        let post = self.repository.get_visible_by_slug(slug, now)?;

        // Synchronous, last-write-wins; a failed bump should not hide the post.
        if let Err(e) = self.repository.increment_view_count(&post.id).await {
            debug!("View count bump failed for {}: {}", post.id, e);
        }

        let related_posts = self.related_posts(&post, now)?;
        let recent_posts =
            self.repository
                .list_recent(RECENT_POSTS_LIMIT, Some(&post.id), now)?;
        let tags = post.tags_list();

        Ok(BlogPostDetail {
            post,
            related_posts,
            recent_posts,
            tags,
        })
    }

    fn feed_items(&self) -> Result<Vec<FeedItem>> {
        let posts = self
            .repository
            .list_recent(FEED_ITEM_LIMIT, None, Self::now())?;
        Ok(posts.iter().map(FeedItem::from).collect())
    }

    async fn create_post(&self, post: NewBlogPost) -> Result<BlogPost> {
        post.validate()?;
        self.repository.create(post).await
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await?;
        Ok(())
    }
}
