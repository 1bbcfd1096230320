//! Tests for blog domain models.

use chrono::NaiveDate;

use crate::blog::{BlogCategory, BlogPost, NewBlogPost};

fn naive(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn sample_post() -> BlogPost {
    BlogPost {
        id: "p1".to_string(),
        title: "Solar Microgrids in Kitui".to_string(),
        slug: "solar-microgrids-in-kitui".to_string(),
        author: "S. Memoi".to_string(),
        author_bio: None,
        author_email: None,
        excerpt: "Field notes from a county microgrid pilot.".to_string(),
        content: "Full content".to_string(),
        category: BlogCategory::Climate,
        tags: "renewable energy, climate, Kenya".to_string(),
        is_published: true,
        is_featured: false,
        published_date: naive(2025, 3, 1),
        meta_title: None,
        meta_description: None,
        view_count: 0,
        created_at: naive(2025, 2, 20),
        updated_at: naive(2025, 2, 20),
    }
}

#[test]
fn test_tags_list_splits_and_trims() {
    let post = sample_post();
    assert_eq!(post.tags_list(), vec!["renewable energy", "climate", "Kenya"]);
}

#[test]
fn test_tags_list_empty_field() {
    let mut post = sample_post();
    post.tags = String::new();
    assert!(post.tags_list().is_empty());
}

#[test]
fn test_display_title_falls_back() {
    let mut post = sample_post();
    assert_eq!(post.display_title(), "Solar Microgrids in Kitui");
    post.meta_title = Some("SEO title".to_string());
    assert_eq!(post.display_title(), "SEO title");
    post.meta_title = Some(String::new());
    assert_eq!(post.display_title(), "Solar Microgrids in Kitui");
}

#[test]
fn test_display_description_falls_back_to_excerpt() {
    let mut post = sample_post();
    assert_eq!(post.display_description(), post.excerpt);
    post.meta_description = Some("SEO description".to_string());
    assert_eq!(post.display_description(), "SEO description");
}

#[test]
fn test_visibility_requires_published_and_past_date() {
    let post = sample_post();
    assert!(post.is_visible(naive(2025, 3, 2)));
    assert!(!post.is_visible(naive(2025, 2, 28)));

    let mut draft = sample_post();
    draft.is_published = false;
    assert!(!draft.is_visible(naive(2025, 3, 2)));
}

#[test]
fn test_shares_tag_is_case_insensitive() {
    let post = sample_post();
    let mut other = sample_post();
    other.id = "p2".to_string();
    other.tags = "CLIMATE finance".to_string();
    assert!(post.shares_tag_with(&other));

    other.tags = "water, sanitation".to_string();
    assert!(!post.shares_tag_with(&other));
}

#[test]
fn test_absolute_url() {
    assert_eq!(sample_post().absolute_url(), "/insights/solar-microgrids-in-kitui/");
}

#[test]
fn test_category_parse_defaults_to_general() {
    assert_eq!(BlogCategory::parse("climate"), BlogCategory::Climate);
    assert_eq!(BlogCategory::parse("bogus"), BlogCategory::General);
}

#[test]
fn test_new_post_resolves_slug_from_title() {
    let new_post = NewBlogPost {
        title: "Grid Resilience & Data".to_string(),
        slug: None,
        author: "E. Kvale".to_string(),
        author_bio: None,
        author_email: None,
        excerpt: "x".to_string(),
        content: "y".to_string(),
        category: BlogCategory::Engineering,
        tags: String::new(),
        is_published: false,
        is_featured: false,
        published_date: naive(2025, 1, 1),
        meta_title: None,
        meta_description: None,
    };
    assert_eq!(new_post.resolved_slug(), "grid-resilience-data");
    assert!(new_post.validate().is_ok());

    let mut explicit = new_post.clone();
    explicit.slug = Some("custom-slug".to_string());
    assert_eq!(explicit.resolved_slug(), "custom-slug");

    let mut untitled = new_post;
    untitled.title = "  ".to_string();
    assert!(untitled.validate().is_err());
}
