//! Database models for blog posts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use meridian_core::blog::{BlogCategory, BlogPost, NewBlogPost};

/// Database model for blog posts. `category` is stored as free text and
/// parsed into the domain enum on read.
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::blog_posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDB {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub author_bio: Option<String>,
    pub author_email: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub published_date: NaiveDateTime,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub view_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::blog_posts)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPostDB {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub author_bio: Option<String>,
    pub author_email: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub published_date: NaiveDateTime,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

// Conversion to domain models
impl From<BlogPostDB> for BlogPost {
    fn from(db: BlogPostDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            slug: db.slug,
            author: db.author,
            author_bio: db.author_bio,
            author_email: db.author_email,
            excerpt: db.excerpt,
            content: db.content,
            category: BlogCategory::parse(&db.category),
            tags: db.tags,
            is_published: db.is_published,
            is_featured: db.is_featured,
            published_date: db.published_date,
            meta_title: db.meta_title,
            meta_description: db.meta_description,
            view_count: db.view_count,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewBlogPost> for NewBlogPostDB {
    fn from(domain: NewBlogPost) -> Self {
        let slug = domain.resolved_slug();
        Self {
            id: None,
            title: domain.title,
            slug,
            author: domain.author,
            author_bio: domain.author_bio,
            author_email: domain.author_email,
            excerpt: domain.excerpt,
            content: domain.content,
            category: domain.category.as_str().to_string(),
            tags: domain.tags,
            is_published: domain.is_published,
            is_featured: domain.is_featured,
            published_date: domain.published_date,
            meta_title: domain.meta_title,
            meta_description: domain.meta_description,
        }
    }
}
