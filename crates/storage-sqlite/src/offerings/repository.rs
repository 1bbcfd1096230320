use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use uuid::Uuid;

use meridian_core::offerings::{
    NewOfferingFeature, NewServiceOffering, OfferingFeature, OfferingFilters,
    OfferingRepositoryTrait, ServiceOffering,
};
use meridian_core::paging::{Page, Pagination};
use meridian_core::Result;

use super::model::{
    NewOfferingFeatureDB, NewServiceOfferingDB, OfferingFeatureDB, ServiceOfferingDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{offering_features, service_offerings};

pub struct OfferingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OfferingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        OfferingRepository { pool, writer }
    }

    /// Active offerings with the list filters applied. Boxed queries cannot
    /// be cloned, so the count and page queries each build one.
    fn filtered_query(
        filters: &OfferingFilters,
    ) -> service_offerings::BoxedQuery<'static, Sqlite> {
        let mut query = service_offerings::table
            .filter(service_offerings::is_active.eq(true))
            .into_boxed();

        if let Some(featured) = filters.featured {
            query = query.filter(service_offerings::is_featured.eq(featured));
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(
                service_offerings::title
                    .like(pattern.clone())
                    .or(service_offerings::short_description.like(pattern.clone()))
                    .or(service_offerings::full_description.like(pattern)),
            );
        }
        query
    }
}

#[async_trait]
impl OfferingRepositoryTrait for OfferingRepository {
    fn list_active(
        &self,
        filters: &OfferingFilters,
        pagination: Pagination,
    ) -> Result<Page<ServiceOffering>> {
        let mut conn = get_connection(&self.pool)?;

        let total = Self::filtered_query(filters)
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = Self::filtered_query(filters)
            .order((
                service_offerings::display_order.asc(),
                service_offerings::title.asc(),
            ))
            .limit(pagination.page_size)
            .offset(pagination.offset())
            .load::<ServiceOfferingDB>(&mut conn)
            .map_err(StorageError::from)?;

        let data = rows.into_iter().map(ServiceOffering::from).collect();
        Ok(Page::new(data, total, pagination))
    }

    fn list_all_active(&self) -> Result<Vec<ServiceOffering>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = service_offerings::table
            .filter(service_offerings::is_active.eq(true))
            .order((
                service_offerings::display_order.asc(),
                service_offerings::title.asc(),
            ))
            .load::<ServiceOfferingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ServiceOffering::from).collect())
    }

    fn get_by_slug(&self, offering_slug: &str) -> Result<ServiceOffering> {
        let mut conn = get_connection(&self.pool)?;
        let row = service_offerings::table
            .filter(service_offerings::slug.eq(offering_slug))
            .filter(service_offerings::is_active.eq(true))
            .first::<ServiceOfferingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(ServiceOffering::from(row))
    }

    fn list_features(&self, for_offering_id: &str) -> Result<Vec<OfferingFeature>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = offering_features::table
            .filter(offering_features::offering_id.eq(for_offering_id))
            .order(offering_features::display_order.asc())
            .load::<OfferingFeatureDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(OfferingFeature::from).collect())
    }

    async fn create(&self, offering: NewServiceOffering) -> Result<ServiceOffering> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ServiceOffering> {
                let mut new_db: NewServiceOfferingDB = offering.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(service_offerings::table)
                    .values(&new_db)
                    .returning(ServiceOfferingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ServiceOffering::from(result_db))
            })
            .await
    }

    async fn create_feature(&self, feature: NewOfferingFeature) -> Result<OfferingFeature> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<OfferingFeature> {
                let mut new_db: NewOfferingFeatureDB = feature.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(offering_features::table)
                    .values(&new_db)
                    .returning(OfferingFeatureDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(OfferingFeature::from(result_db))
            })
            .await
    }
}
