//! Database models for site-wide records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use meridian_core::site::{
    Certification, CertificationStatus, NewCertification, NewOfficeLocation, NewSiteSetting,
    OfficeLocation, SiteSetting,
};

/// Database model for site settings
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
#[diesel(table_name = crate::schema::site_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingDB {
    pub id: String,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::site_settings)]
#[serde(rename_all = "camelCase")]
pub struct NewSiteSettingDB {
    pub id: Option<String>,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

/// Database model for office locations
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
#[diesel(table_name = crate::schema::office_locations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct OfficeLocationDB {
    pub id: String,
    pub name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
    pub display_order: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::office_locations)]
#[serde(rename_all = "camelCase")]
pub struct NewOfficeLocationDB {
    pub id: Option<String>,
    pub name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
    pub display_order: i32,
}

/// Database model for certifications. `status` is stored as plain text and
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
#[diesel(table_name = crate::schema::certifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CertificationDB {
    pub id: String,
    pub name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub certification_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: String,
    pub display_order: i32,
    pub is_featured: bool,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::certifications)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificationDB {
    pub id: Option<String>,
    pub name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub certification_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: String,
    pub display_order: i32,
    pub is_featured: bool,
}

// Conversion to domain models
impl From<SiteSettingDB> for SiteSetting {
    fn from(db: SiteSettingDB) -> Self {
        Self {
            id: db.id,
            key: db.key,
            value: db.value,
            description: db.description,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewSiteSetting> for NewSiteSettingDB {
    fn from(domain: NewSiteSetting) -> Self {
        Self {
            id: None,
            key: domain.key,
            value: domain.value,
            description: domain.description,
        }
    }
}

impl From<OfficeLocationDB> for OfficeLocation {
    fn from(db: OfficeLocationDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            address_line1: db.address_line1,
            address_line2: db.address_line2,
            city: db.city,
            state: db.state,
            zip_code: db.zip_code,
            country: db.country,
            phone: db.phone,
            email: db.email,
            is_primary: db.is_primary,
            display_order: db.display_order,
        }
    }
}

impl From<NewOfficeLocation> for NewOfficeLocationDB {
    fn from(domain: NewOfficeLocation) -> Self {
        Self {
            id: None,
            name: domain.name,
            address_line1: domain.address_line1,
            address_line2: domain.address_line2,
            city: domain.city,
            state: domain.state,
            zip_code: domain.zip_code,
            country: domain.country,
            phone: domain.phone,
            email: domain.email,
            is_primary: domain.is_primary,
            display_order: domain.display_order,
        }
    }
}

impl From<CertificationDB> for Certification {
    fn from(db: CertificationDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            abbreviation: db.abbreviation,
            description: db.description,
            certification_number: db.certification_number,
            issue_date: db.issue_date,
            expiry_date: db.expiry_date,
            status: CertificationStatus::parse(&db.status),
            display_order: db.display_order,
            is_featured: db.is_featured,
        }
    }
}

impl From<NewCertification> for NewCertificationDB {
    fn from(domain: NewCertification) -> Self {
        Self {
            id: None,
            name: domain.name,
            abbreviation: domain.abbreviation,
            description: domain.description,
            certification_number: domain.certification_number,
            issue_date: domain.issue_date,
            expiry_date: domain.expiry_date,
            status: domain.status.as_str().to_string(),
            display_order: domain.display_order,
            is_featured: domain.is_featured,
        }
    }
}
