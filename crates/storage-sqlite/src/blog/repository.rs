use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use uuid::Uuid;

use meridian_core::blog::{BlogPost, BlogPostFilters, BlogRepositoryTrait, NewBlogPost};
use meridian_core::paging::{Page, Pagination};
use meridian_core::Result;

use super::model::{BlogPostDB, NewBlogPostDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::blog_posts;

pub struct BlogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BlogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BlogRepository { pool, writer }
    }

    /// Published posts with a publish date at or before `now`. Every public
    /// read starts from this query.
    fn visible_query(now: NaiveDateTime) -> blog_posts::BoxedQuery<'static, Sqlite> {
        blog_posts::table
            .filter(blog_posts::is_published.eq(true))
            .filter(blog_posts::published_date.le(now))
            .into_boxed()
    }

    fn filtered_query(
        filters: &BlogPostFilters,
        now: NaiveDateTime,
    ) -> blog_posts::BoxedQuery<'static, Sqlite> {
        let mut query = Self::visible_query(now);

        if let Some(category) = filters.category {
            query = query.filter(blog_posts::category.eq(category.as_str()));
        }
        if let Some(tag) = &filters.tag {
            // SQLite LIKE is case-insensitive for ASCII, matching the
            // domain's tag rule.
            query = query.filter(blog_posts::tags.like(format!("%{}%", tag.trim())));
        }
        if let Some(featured) = filters.featured {
            query = query.filter(blog_posts::is_featured.eq(featured));
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(
                blog_posts::title
                    .like(pattern.clone())
                    .or(blog_posts::excerpt.like(pattern.clone()))
                    .or(blog_posts::content.like(pattern.clone()))
                    .or(blog_posts::tags.like(pattern.clone()))
                    .or(blog_posts::author.like(pattern)),
            );
        }
        query
    }
}

#[async_trait]
impl BlogRepositoryTrait for BlogRepository {
    fn list_visible(
        &self,
        filters: &BlogPostFilters,
        pagination: Pagination,
        now: NaiveDateTime,
    ) -> Result<Page<BlogPost>> {
        let mut conn = get_connection(&self.pool)?;

        let total = Self::filtered_query(filters, now)
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = Self::filtered_query(filters, now)
            .order((
                blog_posts::published_date.desc(),
                blog_posts::created_at.desc(),
            ))
            .limit(pagination.page_size)
            .offset(pagination.offset())
            .load::<BlogPostDB>(&mut conn)
            .map_err(StorageError::from)?;

        let data = rows.into_iter().map(BlogPost::from).collect();
        Ok(Page::new(data, total, pagination))
    }

    fn get_visible_by_slug(&self, post_slug: &str, now: NaiveDateTime) -> Result<BlogPost> {
        let mut conn = get_connection(&self.pool)?;
        let row = Self::visible_query(now)
            .filter(blog_posts::slug.eq(post_slug.to_string()))
            .first::<BlogPostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(BlogPost::from(row))
    }

    fn list_featured(&self, limit: i64, now: NaiveDateTime) -> Result<Vec<BlogPost>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::visible_query(now)
            .filter(blog_posts::is_featured.eq(true))
            .order(blog_posts::published_date.desc())
            .limit(limit)
            .load::<BlogPostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    fn list_recent(
        &self,
        limit: i64,
        exclude_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = Self::visible_query(now);
        if let Some(excluded) = exclude_id {
            query = query.filter(blog_posts::id.ne(excluded.to_string()));
        }
        let rows = query
            .order(blog_posts::published_date.desc())
            .limit(limit)
            .load::<BlogPostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    fn list_same_category(
        &self,
        category: &str,
        exclude_id: &str,
        limit: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::visible_query(now)
            .filter(blog_posts::category.eq(category.to_string()))
            .filter(blog_posts::id.ne(exclude_id.to_string()))
            .order(blog_posts::published_date.desc())
            .limit(limit)
            .load::<BlogPostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    fn list_with_tag(
        &self,
        tag: &str,
        exclude_id: &str,
        limit: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<BlogPost>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::visible_query(now)
            .filter(blog_posts::tags.like(format!("%{}%", tag.trim())))
            .filter(blog_posts::id.ne(exclude_id.to_string()))
            .order(blog_posts::published_date.desc())
            .limit(limit)
            .load::<BlogPostDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn increment_view_count(&self, post_id: &str) -> Result<()> {
        let post_id = post_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(blog_posts::table.find(post_id))
                    .set(blog_posts::view_count.eq(blog_posts::view_count + 1))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn create(&self, post: NewBlogPost) -> Result<BlogPost> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BlogPost> {
                let mut new_db: NewBlogPostDB = post.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(blog_posts::table)
                    .values(&new_db)
                    .returning(BlogPostDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(BlogPost::from(result_db))
            })
            .await
    }

    async fn delete(&self, post_id: &str) -> Result<usize> {
        let post_id = post_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(blog_posts::table.find(post_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;
    use crate::db::run_migrations;
    use chrono::{Duration, Utc};
    use meridian_core::blog::{BlogCategory, BlogPostFilters, NewBlogPost};
    use tempfile::tempdir;

    async fn test_repository() -> (BlogRepository, Arc<crate::db::DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("temp dir");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("pool");
        run_migrations(&pool).expect("migrations");
        let writer = crate::db::spawn_writer(Arc::clone(&pool));
        let repo = BlogRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn sample_post(title: &str, tags: &str, days_ago: i64) -> NewBlogPost {
        NewBlogPost {
            title: title.to_string(),
            slug: None,
            author: "Amina Okafor".to_string(),
            author_bio: None,
            author_email: None,
            excerpt: "Excerpt".to_string(),
            content: "Body".to_string(),
            category: BlogCategory::Engineering,
            tags: tags.to_string(),
            is_published: true,
            is_featured: false,
            published_date: Utc::now().naive_utc() - Duration::days(days_ago),
            meta_title: None,
            meta_description: None,
        }
    }

    #[tokio::test]
    async fn test_tag_filter_is_case_insensitive() {
        let (repo, _pool, _dir) = test_repository().await;
        repo.create(sample_post("Solar Mapping", "GIS, Solar", 2))
            .await
            .expect("create");
        repo.create(sample_post("Well Drilling", "Hydrology", 1))
            .await
            .expect("create");

        let filters = BlogPostFilters {
            tag: Some("gis".to_string()),
            ..Default::default()
        };
        let now = Utc::now().naive_utc();
        let page = repo
            .list_visible(&filters, Pagination::new(1, 10), now)
            .expect("list");
        assert_eq!(page.meta.total_row_count, 1);
        assert_eq!(page.data[0].title, "Solar Mapping");
    }

    #[tokio::test]
    async fn test_search_matches_author() {
        let (repo, _pool, _dir) = test_repository().await;
        let mut by_nyambura = sample_post("Dam Safety Review", "", 3);
        by_nyambura.author = "Nyambura Otieno".to_string();
        repo.create(by_nyambura).await.expect("create");
        repo.create(sample_post("Road Rehab Notes", "", 1))
            .await
            .expect("create");

        let filters = BlogPostFilters {
            search: Some("Nyambura".to_string()),
            ..Default::default()
        };
        let now = Utc::now().naive_utc();
        let page = repo
            .list_visible(&filters, Pagination::new(1, 10), now)
            .expect("list");
        assert_eq!(page.meta.total_row_count, 1);
        assert_eq!(page.data[0].title, "Dam Safety Review");
    }

    #[tokio::test]
    async fn test_scheduled_post_stays_hidden() {
        let (repo, _pool, _dir) = test_repository().await;
        let future = repo
            .create(sample_post("Scheduled", "", -3))
            .await
            .expect("create");
        repo.create(sample_post("Live", "", 1)).await.expect("create");

        let now = Utc::now().naive_utc();
        let page = repo
            .list_visible(&BlogPostFilters::default(), Pagination::new(1, 10), now)
            .expect("list");
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title, "Live");
        assert!(repo.get_visible_by_slug(&future.slug, now).is_err());
    }

    #[tokio::test]
    async fn test_increment_view_count_persists() {
        let (repo, _pool, _dir) = test_repository().await;
        let post = repo.create(sample_post("Counted", "", 1)).await.expect("create");
        repo.increment_view_count(&post.id).await.expect("bump");
        repo.increment_view_count(&post.id).await.expect("bump");

        let now = Utc::now().naive_utc();
        let reloaded = repo.get_visible_by_slug(&post.slug, now).expect("reload");
        assert_eq!(reloaded.view_count, 2);
    }
}
