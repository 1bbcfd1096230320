//! Blog domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::{slugify, split_comma_list};

/// Editorial category for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlogCategory {
    Engineering,
    DataScience,
    Climate,
    Government,
    International,
    #[default]
    General,
}

impl BlogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::Engineering => "engineering",
            BlogCategory::DataScience => "data_science",
            BlogCategory::Climate => "climate",
            BlogCategory::Government => "government",
            BlogCategory::International => "international",
            BlogCategory::General => "general",
        }
    }

    /// Human-readable label, used as the feed category.
    pub fn label(&self) -> &'static str {
        match self {
            BlogCategory::Engineering => "Engineering",
            BlogCategory::DataScience => "Data Science",
            BlogCategory::Climate => "Climate & Sustainability",
            BlogCategory::Government => "Government Contracting",
            BlogCategory::International => "International Development",
            BlogCategory::General => "General",
        }
    }

    /// Unknown values fall back to General rather than erroring; the column
    /// is free text at the storage layer.
    pub fn parse(value: &str) -> Self {
        match value {
            "engineering" => BlogCategory::Engineering,
            "data_science" => BlogCategory::DataScience,
            "climate" => BlogCategory::Climate,
            "government" => BlogCategory::Government,
            "international" => BlogCategory::International,
            _ => BlogCategory::General,
        }
    }

    pub fn all() -> &'static [BlogCategory] {
        &[
            BlogCategory::Engineering,
            BlogCategory::DataScience,
            BlogCategory::Climate,
            BlogCategory::Government,
            BlogCategory::International,
            BlogCategory::General,
        ]
    }
}

/// A published or draft insight article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub author_bio: Option<String>,
    pub author_email: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    /// Comma-separated tags, kept raw; use `tags_list()` for the split view.
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

impl BlogPost {
    pub fn display_title(&self) -> &str {
        match &self.meta_title {
            Some(t) if !t.is_empty() => t,
            _ => &self.title,
        }
    }

    pub fn display_description(&self) -> &str {
        match &self.meta_description {
            Some(d) if !d.is_empty() => d,
            _ => &self.excerpt,
        }
    }

    pub fn tags_list(&self) -> Vec<String> {
        split_comma_list(&self.tags)
    }

    /// A post is publicly visible when published and its publish date has
    /// passed (scheduled posts stay hidden).
    pub fn is_visible(&self, now: NaiveDateTime) -> bool {
        self.is_published && self.published_date <= now
    }

    /// Whether any of this post's tags appears in `other`'s tag field,
    /// case-insensitively. Drives related-post selection.
    pub fn shares_tag_with(&self, other: &BlogPost) -> bool {
        let other_tags = other.tags.to_lowercase();
        self.tags_list()
            .iter()
            .any(|tag| other_tags.contains(&tag.to_lowercase()))
    }

    /// Absolute path to the post on the public site.
    pub fn absolute_url(&self) -> String {
        format!("/insights/{}/", self.slug)
    }
}

/// Input model for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub slug: Option<String>,
    pub author: String,
    pub author_bio: Option<String>,
    pub author_email: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub tags: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub published_date: NaiveDateTime,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl NewBlogPost {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if self.author.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "author".to_string(),
            )));
        }
        if self.excerpt.chars().count() > 500 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Excerpt is limited to 500 characters".to_string(),
            )));
        }
        Ok(())
    }

    pub fn resolved_slug(&self) -> String {
        match &self.slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&self.title),
        }
    }
}

/// Query filters for the public list. All filters AND together; the search
/// term ORs across title/excerpt/content/tags/author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostFilters {
    pub category: Option<BlogCategory>,
    /// Case-insensitive substring match over the raw comma-joined tags field.
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

/// Detail payload for a single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDetail {
    pub post: BlogPost,
    pub related_posts: Vec<BlogPost>,
    pub recent_posts: Vec<BlogPost>,
    pub tags: Vec<String>,
}

/// One RSS feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub author: String,
    pub category: String,
    pub published_date: NaiveDateTime,
}

impl From<&BlogPost> for FeedItem {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            description: post.excerpt.clone(),
            link: post.absolute_url(),
            author: post.author.clone(),
            category: post.category.label().to_string(),
            published_date: post.published_date,
        }
    }
}
