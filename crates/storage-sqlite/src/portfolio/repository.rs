use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use uuid::Uuid;

use meridian_core::portfolio::{
    CaseStudy, CaseStudyFilters, CaseStudyImage, CaseStudyTestimonial, NewCaseStudy,
    NewCaseStudyImage, NewCaseStudyTestimonial, PortfolioRepositoryTrait,
};
use meridian_core::paging::{Page, Pagination};
use meridian_core::Result;

use super::model::{
    CaseStudyDB, CaseStudyImageDB, CaseStudyTestimonialDB, NewCaseStudyDB, NewCaseStudyImageDB,
    NewCaseStudyTestimonialDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{case_studies, case_study_images, case_study_testimonials, service_offerings};

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PortfolioRepository { pool, writer }
    }

    fn published_query() -> case_studies::BoxedQuery<'static, Sqlite> {
        case_studies::table
            .filter(case_studies::is_published.eq(true))
            .into_boxed()
    }

    /// Published case studies with the list filters applied. The offering
    /// slug is pre-resolved to ids so the query stays join-free; an unknown
    /// slug matches nothing.
    fn filtered_query(
        filters: &CaseStudyFilters,
        offering_ids: Option<Vec<String>>,
    ) -> case_studies::BoxedQuery<'static, Sqlite> {
        let mut query = Self::published_query();

        if let Some(client_type) = filters.client_type {
            query = query.filter(case_studies::client_type.eq(client_type.as_str()));
        }
        if let Some(ids) = offering_ids {
            query = query.filter(case_studies::offering_id.eq_any(ids));
        }
        if let Some(featured) = filters.featured {
            query = query.filter(case_studies::is_featured.eq(featured));
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(
                case_studies::title
                    .like(pattern.clone())
                    .or(case_studies::challenge.like(pattern.clone()))
                    .or(case_studies::solution.like(pattern.clone()))
                    .or(case_studies::results.like(pattern.clone()))
                    .or(case_studies::technologies.like(pattern.clone()))
                    .or(case_studies::client_name.like(pattern)),
            );
        }
        query
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn list_published(
        &self,
        filters: &CaseStudyFilters,
        pagination: Pagination,
    ) -> Result<Page<CaseStudy>> {
        let mut conn = get_connection(&self.pool)?;

        let offering_ids = match &filters.offering_slug {
            Some(offering_slug) => Some(
                service_offerings::table
                    .filter(service_offerings::slug.eq(offering_slug))
                    .select(service_offerings::id)
                    .load::<String>(&mut conn)
                    .map_err(StorageError::from)?,
            ),
            None => None,
        };

        let total = Self::filtered_query(filters, offering_ids.clone())
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = Self::filtered_query(filters, offering_ids)
            .order((
                case_studies::published_date.desc(),
                case_studies::created_at.desc(),
            ))
            .limit(pagination.page_size)
            .offset(pagination.offset())
            .load::<CaseStudyDB>(&mut conn)
            .map_err(StorageError::from)?;

        let data = rows.into_iter().map(CaseStudy::from).collect();
        Ok(Page::new(data, total, pagination))
    }

    fn get_published_by_slug(&self, case_study_slug: &str) -> Result<CaseStudy> {
        let mut conn = get_connection(&self.pool)?;
        let row = Self::published_query()
            .filter(case_studies::slug.eq(case_study_slug.to_string()))
            .first::<CaseStudyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(CaseStudy::from(row))
    }

    fn list_featured(&self, limit: i64) -> Result<Vec<CaseStudy>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::published_query()
            .filter(case_studies::is_featured.eq(true))
            .order(case_studies::published_date.desc())
            .limit(limit)
            .load::<CaseStudyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CaseStudy::from).collect())
    }

    fn list_same_offering(
        &self,
        for_offering_id: &str,
        exclude_id: &str,
        limit: i64,
    ) -> Result<Vec<CaseStudy>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::published_query()
            .filter(case_studies::offering_id.eq(for_offering_id.to_string()))
            .filter(case_studies::id.ne(exclude_id.to_string()))
            .order(case_studies::published_date.desc())
            .limit(limit)
            .load::<CaseStudyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CaseStudy::from).collect())
    }

    fn list_same_client_type(
        &self,
        client_type: &str,
        exclude_offering_id: Option<&str>,
        exclude_id: &str,
        limit: i64,
    ) -> Result<Vec<CaseStudy>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = Self::published_query()
            .filter(case_studies::client_type.eq(client_type.to_string()))
            .filter(case_studies::id.ne(exclude_id.to_string()));
        if let Some(excluded_offering) = exclude_offering_id {
            query = query.filter(
                case_studies::offering_id
                    .ne(excluded_offering.to_string())
                    .or(case_studies::offering_id.is_null()),
            );
        }
        let rows = query
            .order(case_studies::published_date.desc())
            .limit(limit)
            .load::<CaseStudyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CaseStudy::from).collect())
    }

    fn list_images(&self, for_case_study_id: &str) -> Result<Vec<CaseStudyImage>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = case_study_images::table
            .filter(case_study_images::case_study_id.eq(for_case_study_id))
            .order(case_study_images::display_order.asc())
            .load::<CaseStudyImageDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CaseStudyImage::from).collect())
    }

    fn list_testimonials(&self, for_case_study_id: &str) -> Result<Vec<CaseStudyTestimonial>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = case_study_testimonials::table
            .filter(case_study_testimonials::case_study_id.eq(for_case_study_id))
            .order(case_study_testimonials::display_order.asc())
            .load::<CaseStudyTestimonialDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CaseStudyTestimonial::from).collect())
    }

    async fn create(&self, case_study: NewCaseStudy) -> Result<CaseStudy> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CaseStudy> {
                let mut new_db: NewCaseStudyDB = case_study.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(case_studies::table)
                    .values(&new_db)
                    .returning(CaseStudyDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(CaseStudy::from(result_db))
            })
            .await
    }

    async fn create_image(&self, image: NewCaseStudyImage) -> Result<CaseStudyImage> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CaseStudyImage> {
                // Alt-text fallback needs the parent title, read inside the
                // same transaction.
                let parent_title = case_studies::table
                    .find(&image.case_study_id)
                    .select(case_studies::title)
                    .first::<String>(conn)
                    .map_err(StorageError::from)?;

                let new_db = NewCaseStudyImageDB {
                    id: Some(Uuid::new_v4().to_string()),
                    case_study_id: image.case_study_id.clone(),
                    image_path: image.image_path.clone(),
                    caption: image.caption.clone(),
                    alt_text: image.resolved_alt_text(&parent_title),
                    display_order: image.display_order,
                    is_primary: image.is_primary,
                };

                let result_db = diesel::insert_into(case_study_images::table)
                    .values(&new_db)
                    .returning(CaseStudyImageDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(CaseStudyImage::from(result_db))
            })
            .await
    }

    async fn create_testimonial(
        &self,
        testimonial: NewCaseStudyTestimonial,
    ) -> Result<CaseStudyTestimonial> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<CaseStudyTestimonial> {
                    let mut new_db: NewCaseStudyTestimonialDB = testimonial.into();
                    new_db.id = Some(Uuid::new_v4().to_string());

                    let result_db = diesel::insert_into(case_study_testimonials::table)
                        .values(&new_db)
                        .returning(CaseStudyTestimonialDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(CaseStudyTestimonial::from(result_db))
                },
            )
            .await
    }

    async fn delete(&self, case_study_id: &str) -> Result<usize> {
        let case_study_id = case_study_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(case_studies::table.find(case_study_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
