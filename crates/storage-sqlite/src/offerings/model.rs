//! Database models for the service catalog.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use meridian_core::offerings::{
    NewOfferingFeature, NewServiceOffering, OfferingFeature, ServiceOffering,
};

/// Database model for service offerings
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
#[diesel(table_name = crate::schema::service_offerings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ServiceOfferingDB {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub full_description: String,
    pub icon: String,
    pub display_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::service_offerings)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceOfferingDB {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub full_description: String,
    pub icon: String,
    pub display_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

/// Database model for offering features
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
#[diesel(table_name = crate::schema::offering_features)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct OfferingFeatureDB {
    pub id: String,
    pub offering_id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::offering_features)]
#[serde(rename_all = "camelCase")]
pub struct NewOfferingFeatureDB {
    pub id: Option<String>,
    pub offering_id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

// Conversion to domain models
impl From<ServiceOfferingDB> for ServiceOffering {
    fn from(db: ServiceOfferingDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            slug: db.slug,
            short_description: db.short_description,
            full_description: db.full_description,
            icon: db.icon,
            display_order: db.display_order,
            is_active: db.is_active,
            is_featured: db.is_featured,
            meta_title: db.meta_title,
            meta_description: db.meta_description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewServiceOffering> for NewServiceOfferingDB {
    fn from(domain: NewServiceOffering) -> Self {
        let slug = domain.resolved_slug();
        Self {
            id: None,
            title: domain.title,
            slug,
            short_description: domain.short_description,
            full_description: domain.full_description,
            icon: domain.icon,
            display_order: domain.display_order,
            is_active: domain.is_active,
            is_featured: domain.is_featured,
            meta_title: domain.meta_title,
            meta_description: domain.meta_description,
        }
    }
}

impl From<OfferingFeatureDB> for OfferingFeature {
    fn from(db: OfferingFeatureDB) -> Self {
        Self {
            id: db.id,
            offering_id: db.offering_id,
            title: db.title,
            description: db.description,
            icon: db.icon,
            display_order: db.display_order,
        }
    }
}

impl From<NewOfferingFeature> for NewOfferingFeatureDB {
    fn from(domain: NewOfferingFeature) -> Self {
        Self {
            id: None,
            offering_id: domain.offering_id,
            title: domain.title,
            description: domain.description,
            icon: domain.icon,
            display_order: domain.display_order,
        }
    }
}
