//! Database models for the CRM.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use meridian_core::crm::{
    Contact, ContactCategory, ContactInteraction, ContactRole, InteractionType, NewContact,
    NewContactCategory, NewContactInteraction, NewOrganization, NewOrganizationType, Organization,
    OrganizationStatus, OrganizationType,
};
use meridian_core::plan::Priority;

/// Database model for organization types
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
#[diesel(table_name = crate::schema::organization_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct OrganizationTypeDB {
    pub id: String,
    pub name: String,
    pub description: String,
    pub display_order: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::organization_types)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganizationTypeDB {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub display_order: i32,
}

/// Database model for contact categories
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
#[diesel(table_name = crate::schema::contact_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContactCategoryDB {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
    pub display_order: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contact_categories)]
#[serde(rename_all = "camelCase")]
pub struct NewContactCategoryDB {
    pub id: Option<String>,
    pub name: String,
    pub color: String,
    pub description: String,
    pub display_order: i32,
}

/// Database model for organizations
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::organizations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDB {
    pub id: String,
    pub name: String,
    pub type_id: Option<String>,
    pub category_id: Option<String>,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub description: String,
    pub key_notes: String,
    pub contact_strategy: String,
    pub priority: String,
    pub status: String,
    pub assignee: Option<String>,
    pub tags: String,
    pub last_contacted: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::organizations)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganizationDB {
    pub id: Option<String>,
    pub name: String,
    pub type_id: Option<String>,
    pub category_id: Option<String>,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub description: String,
    pub key_notes: String,
    pub contact_strategy: String,
    pub priority: String,
    pub status: String,
    pub assignee: Option<String>,
    pub tags: String,
}

/// Update changeset for organizations. `last_contacted` is deliberately
/// absent; only interactions move it.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::organizations)]
#[diesel(treat_none_as_null = true)]
pub struct OrganizationChangeset {
    pub name: String,
    pub type_id: Option<String>,
    pub category_id: Option<String>,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub description: String,
    pub key_notes: String,
    pub contact_strategy: String,
    pub priority: String,
    pub status: String,
    pub assignee: Option<String>,
    pub tags: String,
    pub updated_at: NaiveDateTime,
}

/// Database model for contacts
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContactDB {
    pub id: String,
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub role: Option<String>,
    pub is_primary: bool,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub office_location: String,
    pub notes: String,
    pub key_info: String,
    pub is_active: bool,
    pub last_contacted: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contacts)]
#[serde(rename_all = "camelCase")]
pub struct NewContactDB {
    pub id: Option<String>,
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub role: Option<String>,
    pub is_primary: bool,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub office_location: String,
    pub notes: String,
    pub key_info: String,
    pub is_active: bool,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(treat_none_as_null = true)]
pub struct ContactChangeset {
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub role: Option<String>,
    pub is_primary: bool,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub office_location: String,
    pub notes: String,
    pub key_info: String,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

/// Database model for contact interactions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contact_interactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContactInteractionDB {
    pub id: String,
    pub contact_id: Option<String>,
    pub organization_id: String,
    pub interaction_type: String,
    pub subject: String,
    pub notes: String,
    pub interaction_date: NaiveDateTime,
    pub next_action: String,
    pub next_action_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contact_interactions)]
#[serde(rename_all = "camelCase")]
pub struct NewContactInteractionDB {
    pub id: Option<String>,
    pub contact_id: Option<String>,
    pub organization_id: String,
    pub interaction_type: String,
    pub subject: String,
    pub notes: String,
    pub interaction_date: NaiveDateTime,
    pub next_action: String,
    pub next_action_date: Option<NaiveDate>,
}

// Conversion to domain models
impl From<OrganizationTypeDB> for OrganizationType {
    fn from(db: OrganizationTypeDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            display_order: db.display_order,
        }
    }
}

impl From<NewOrganizationType> for NewOrganizationTypeDB {
    fn from(domain: NewOrganizationType) -> Self {
        Self {
            id: None,
            name: domain.name,
            description: domain.description,
            display_order: domain.display_order,
        }
    }
}

impl From<ContactCategoryDB> for ContactCategory {
    fn from(db: ContactCategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            color: db.color,
            description: db.description,
            display_order: db.display_order,
        }
    }
}

impl From<NewContactCategory> for NewContactCategoryDB {
    fn from(domain: NewContactCategory) -> Self {
        Self {
            id: None,
            name: domain.name,
            color: domain.color,
            description: domain.description,
            display_order: domain.display_order,
        }
    }
}

impl From<OrganizationDB> for Organization {
    fn from(db: OrganizationDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            type_id: db.type_id,
            category_id: db.category_id,
            website: db.website,
            email: db.email,
            phone: db.phone,
            address: db.address,
            location: db.location,
            description: db.description,
            key_notes: db.key_notes,
            contact_strategy: db.contact_strategy,
            priority: Priority::parse(&db.priority),
            status: OrganizationStatus::parse(&db.status),
            assignee: db.assignee,
            tags: db.tags,
            last_contacted: db.last_contacted,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewOrganization> for NewOrganizationDB {
    fn from(domain: NewOrganization) -> Self {
        Self {
            id: None,
            name: domain.name,
            type_id: domain.type_id,
            category_id: domain.category_id,
            website: domain.website,
            email: domain.email,
            phone: domain.phone,
            address: domain.address,
            location: domain.location,
            description: domain.description,
            key_notes: domain.key_notes,
            contact_strategy: domain.contact_strategy,
            priority: domain.priority.as_str().to_string(),
            status: domain.status.as_str().to_string(),
            assignee: domain.assignee,
            tags: domain.tags,
        }
    }
}

impl From<NewOrganization> for OrganizationChangeset {
    fn from(domain: NewOrganization) -> Self {
        Self {
            name: domain.name,
            type_id: domain.type_id,
            category_id: domain.category_id,
            website: domain.website,
            email: domain.email,
            phone: domain.phone,
            address: domain.address,
            location: domain.location,
            description: domain.description,
            key_notes: domain.key_notes,
            contact_strategy: domain.contact_strategy,
            priority: domain.priority.as_str().to_string(),
            status: domain.status.as_str().to_string(),
            assignee: domain.assignee,
            tags: domain.tags,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<ContactDB> for Contact {
    fn from(db: ContactDB) -> Self {
        Self {
            id: db.id,
            organization_id: db.organization_id,
            first_name: db.first_name,
            last_name: db.last_name,
            title: db.title,
            role: db.role.as_deref().map(ContactRole::parse),
            is_primary: db.is_primary,
            email: db.email,
            phone: db.phone,
            mobile: db.mobile,
            office_location: db.office_location,
            notes: db.notes,
            key_info: db.key_info,
            is_active: db.is_active,
            last_contacted: db.last_contacted,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewContact> for NewContactDB {
    fn from(domain: NewContact) -> Self {
        Self {
            id: None,
            organization_id: domain.organization_id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            title: domain.title,
            role: domain.role.map(|r| r.as_str().to_string()),
            is_primary: domain.is_primary,
            email: domain.email,
            phone: domain.phone,
            mobile: domain.mobile,
            office_location: domain.office_location,
            notes: domain.notes,
            key_info: domain.key_info,
            is_active: domain.is_active,
        }
    }
}

impl From<NewContact> for ContactChangeset {
    fn from(domain: NewContact) -> Self {
        Self {
            organization_id: domain.organization_id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            title: domain.title,
            role: domain.role.map(|r| r.as_str().to_string()),
            is_primary: domain.is_primary,
            email: domain.email,
            phone: domain.phone,
            mobile: domain.mobile,
            office_location: domain.office_location,
            notes: domain.notes,
            key_info: domain.key_info,
            is_active: domain.is_active,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<ContactInteractionDB> for ContactInteraction {
    fn from(db: ContactInteractionDB) -> Self {
        Self {
            id: db.id,
            contact_id: db.contact_id,
            organization_id: db.organization_id,
            interaction_type: InteractionType::parse(&db.interaction_type),
            subject: db.subject,
            notes: db.notes,
            interaction_date: db.interaction_date,
            next_action: db.next_action,
            next_action_date: db.next_action_date,
            created_at: db.created_at,
        }
    }
}

impl From<NewContactInteraction> for NewContactInteractionDB {
    fn from(domain: NewContactInteraction) -> Self {
        Self {
            id: None,
            contact_id: domain.contact_id,
            organization_id: domain.organization_id,
            interaction_type: domain.interaction_type.as_str().to_string(),
            subject: domain.subject,
            notes: domain.notes,
            interaction_date: domain.interaction_date,
            next_action: domain.next_action,
            next_action_date: domain.next_action_date,
        }
    }
}
