//! Blog module - insights and articles.

mod blog_model;
#[cfg(test)]
mod blog_model_tests;
mod blog_service;
#[cfg(test)]
mod blog_service_tests;
mod blog_traits;

pub use blog_model::{
    BlogCategory, BlogPost, BlogPostDetail, BlogPostFilters, FeedItem, NewBlogPost,
};
pub use blog_service::BlogService;
pub use blog_traits::{BlogRepositoryTrait, BlogServiceTrait};
