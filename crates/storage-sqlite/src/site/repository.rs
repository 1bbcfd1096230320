use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use meridian_core::site::{
    Certification, NewCertification, NewOfficeLocation, NewSiteSetting, OfficeLocation,
    SiteRepositoryTrait, SiteSetting,
};
use meridian_core::Result;

use super::model::{
    CertificationDB, NewCertificationDB, NewOfficeLocationDB, NewSiteSettingDB, OfficeLocationDB,
    SiteSettingDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{certifications, office_locations, site_settings};

pub struct SiteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SiteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SiteRepository { pool, writer }
    }
}

#[async_trait]
impl SiteRepositoryTrait for SiteRepository {
    fn list_settings(&self) -> Result<Vec<SiteSetting>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = site_settings::table
            .order(site_settings::key.asc())
            .load::<SiteSettingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(SiteSetting::from).collect())
    }

    async fn upsert_setting(&self, setting: NewSiteSetting) -> Result<SiteSetting> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SiteSetting> {
                let mut new_db: NewSiteSettingDB = setting.into();
                new_db.id = Some(Uuid::new_v4().to_string());
                let now = Utc::now().naive_utc();

                let result_db = diesel::insert_into(site_settings::table)
                    .values(&new_db)
                    .on_conflict(site_settings::key)
                    .do_update()
                    .set((
                        site_settings::value.eq(&new_db.value),
                        site_settings::description.eq(&new_db.description),
                        site_settings::updated_at.eq(now),
                    ))
                    .returning(SiteSettingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(SiteSetting::from(result_db))
            })
            .await
    }

    fn list_office_locations(&self) -> Result<Vec<OfficeLocation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = office_locations::table
            .order((
                office_locations::display_order.asc(),
                office_locations::name.asc(),
            ))
            .load::<OfficeLocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(OfficeLocation::from).collect())
    }

    async fn create_office_location(&self, location: NewOfficeLocation) -> Result<OfficeLocation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<OfficeLocation> {
                let mut new_db: NewOfficeLocationDB = location.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(office_locations::table)
                    .values(&new_db)
                    .returning(OfficeLocationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(OfficeLocation::from(result_db))
            })
            .await
    }

    fn list_certifications(&self) -> Result<Vec<Certification>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = certifications::table
            .order((
                certifications::display_order.asc(),
                certifications::name.asc(),
            ))
            .load::<CertificationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Certification::from).collect())
    }

    fn get_certification(&self, cert_id: &str) -> Result<Certification> {
        let mut conn = get_connection(&self.pool)?;
        let row = certifications::table
            .find(cert_id)
            .first::<CertificationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Certification::from(row))
    }

    async fn create_certification(&self, certification: NewCertification) -> Result<Certification> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Certification> {
                let mut new_db: NewCertificationDB = certification.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(certifications::table)
                    .values(&new_db)
                    .returning(CertificationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Certification::from(result_db))
            })
            .await
    }
}
