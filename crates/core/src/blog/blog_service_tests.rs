//! Tests for the blog service against a mock repository.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::blog::{
    BlogCategory, BlogPost, BlogPostFilters, BlogRepositoryTrait, BlogService, BlogServiceTrait,
    NewBlogPost,
};
use crate::errors::{Error, Result};
use crate::paging::{Page, Pagination};

fn naive(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn post(id: &str, category: BlogCategory, tags: &str) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: format!("Post {}", id),
        slug: format!("post-{}", id),
        author: "Author".to_string(),
        author_bio: None,
        author_email: None,
        excerpt: "Excerpt".to_string(),
        content: "Content".to_string(),
        category,
        tags: tags.to_string(),
        is_published: true,
        is_featured: false,
        published_date: naive(2025, 1, 1),
        meta_title: None,
        meta_description: None,
        view_count: 0,
        created_at: naive(2025, 1, 1),
        updated_at: naive(2025, 1, 1),
    }
}

// --- Mock repository ---

struct MockBlogRepository {
    posts: Vec<BlogPost>,
    view_bumps: Arc<Mutex<Vec<String>>>,
}

impl MockBlogRepository {
    fn new(posts: Vec<BlogPost>) -> Self {
        Self {
            posts,
            view_bumps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn visible(&self, now: NaiveDateTime) -> Vec<BlogPost> {
        self.posts
            .iter()
            .filter(|p| p.is_visible(now))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BlogRepositoryTrait for MockBlogRepository {
    fn list_visible(
        &self,
        _filters: &BlogPostFilters,
        pagination: Pagination,
        now: NaiveDateTime,
    ) -> Result<Page<BlogPost>> {
        let visible = self.visible(now);
        let total = visible.len() as i64;
        Ok(Page::new(visible, total, pagination))
    }

    fn get_visible_by_slug(&self, slug: &str, now: NaiveDateTime) -> Result<BlogPost> {
        self.visible(now)
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| Error::NotFound("Blog post".to_string()))
    }

    fn list_featured(&self, limit: i64, now: NaiveDateTime) -> Result<Vec<BlogPost>> {
        Ok(self
            .visible(now)
            .into_iter()
            .filter(|p| p.is_featured)
            .take(limit as usize)
            .collect())
    }

    fn list_recent(
        &self,
        limit: i64,
        exclude_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>> {
        Ok(self
            .visible(now)
            .into_iter()
            .filter(|p| Some(p.id.as_str()) != exclude_id)
            .take(limit as usize)
            .collect())
    }

    fn list_same_category(
        &self,
        category: &str,
        exclude_id: &str,
        limit: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>> {
        Ok(self
            .visible(now)
            .into_iter()
            .filter(|p| p.category.as_str() == category && p.id != exclude_id)
            .take(limit as usize)
            .collect())
    }

    fn list_with_tag(
        &self,
        tag: &str,
        exclude_id: &str,
        limit: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>> {
        let needle = tag.to_lowercase();
        Ok(self
            .visible(now)
            .into_iter()
            .filter(|p| p.id != exclude_id && p.tags.to_lowercase().contains(&needle))
            .take(limit as usize)
            .collect())
    }

    async fn increment_view_count(&self, id: &str) -> Result<()> {
        self.view_bumps.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn create(&self, _post: NewBlogPost) -> Result<BlogPost> {
        unimplemented!()
    }

    async fn delete(&self, _id: &str) -> Result<usize> {
        unimplemented!()
    }
}

#[tokio::test]
async fn test_get_post_bumps_view_count() {
    let repo = Arc::new(MockBlogRepository::new(vec![post(
        "a",
        BlogCategory::Climate,
        "climate",
    )]));
    let bumps = repo.view_bumps.clone();
    let service = BlogService::new(repo);

    let detail = service.get_post("post-a").await.unwrap();
    assert_eq!(detail.post.id, "a");
    assert_eq!(bumps.lock().unwrap().as_slice(), ["a".to_string()]);
}

#[tokio::test]
async fn test_related_posts_dedup_and_cap() {
    // b and c share the category; c and e also share the "solar" tag. The
    // category matches come first, the duplicate c collapses, and the cap
    // leaves room for one tag match.
    let posts = vec![
        post("a", BlogCategory::Climate, "solar, kenya"),
        post("b", BlogCategory::Climate, "water"),
        post("c", BlogCategory::Climate, "solar"),
        post("d", BlogCategory::Engineering, "kenya"),
        post("e", BlogCategory::Engineering, "solar"),
    ];
    let service = BlogService::new(Arc::new(MockBlogRepository::new(posts)));

    let detail = service.get_post("post-a").await.unwrap();
    let ids: Vec<&str> = detail.related_posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["b", "c", "e"]);
}

#[tokio::test]
async fn test_related_posts_tag_cap_spans_all_tags() {
    // No same-category siblings, and tag matches spread over two tags. The
    // cap of two applies to the merged tag matches, so the third one from
    // the second tag never surfaces.
    let posts = vec![
        post("a", BlogCategory::Climate, "solar, hydro"),
        post("x1", BlogCategory::Engineering, "solar"),
        post("x2", BlogCategory::Engineering, "solar"),
        post("y1", BlogCategory::Engineering, "hydro"),
    ];
    let service = BlogService::new(Arc::new(MockBlogRepository::new(posts)));

    let detail = service.get_post("post-a").await.unwrap();
    let ids: Vec<&str> = detail.related_posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["x1", "x2"]);
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let service = BlogService::new(Arc::new(MockBlogRepository::new(vec![])));
    let err = service.get_post("missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_feed_items_map_post_fields() {
    let mut featured = post("a", BlogCategory::DataScience, "ml");
    featured.excerpt = "Short summary".to_string();
    let service = BlogService::new(Arc::new(MockBlogRepository::new(vec![featured])));

    let items = service.feed_items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Post a");
    assert_eq!(items[0].description, "Short summary");
    assert_eq!(items[0].link, "/insights/post-a/");
    assert_eq!(items[0].category, "Data Science");
}

#[test]
fn test_list_posts_uses_fixed_page_size() {
    let service = BlogService::new(Arc::new(MockBlogRepository::new(vec![])));
    let page = service.list_posts(BlogPostFilters::default(), 2).unwrap();
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.page_size, 10);
}
