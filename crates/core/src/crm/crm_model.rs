//! Lightweight CRM models: organizations, contacts and interaction history.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::plan::Priority;
use crate::utils::split_comma_list;

/// Lookup row for classifying organizations (agency, prime, university...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganizationType {
    pub name: String,
    pub description: String,
    pub display_order: i32,
}

/// Lookup row for contact grouping, with a display color for the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactCategory {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactCategory {
    pub name: String,
    pub color: String,
    pub description: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationStatus {
    Active,
    Inactive,
    #[default]
    Prospect,
    Partner,
    Competitor,
}

impl OrganizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationStatus::Active => "active",
            OrganizationStatus::Inactive => "inactive",
            OrganizationStatus::Prospect => "prospect",
            OrganizationStatus::Partner => "partner",
            OrganizationStatus::Competitor => "competitor",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "active" => OrganizationStatus::Active,
            "inactive" => OrganizationStatus::Inactive,
            "partner" => OrganizationStatus::Partner,
            "competitor" => OrganizationStatus::Competitor,
            _ => OrganizationStatus::Prospect,
        }
    }
}

/// A tracked organization: client, agency, partner or prospect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    /// Cleared when the type row is deleted.
    pub type_id: Option<String>,
    /// Cleared when the category row is deleted.
    pub category_id: Option<String>,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub description: String,
    pub key_notes: String,
    pub contact_strategy: String,
    pub priority: Priority,
    pub status: OrganizationStatus,
    pub assignee: Option<String>,
    /// Comma-separated labels.
    pub tags: String,
    pub last_contacted: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Organization {
    pub fn tags_list(&self) -> Vec<String> {
        split_comma_list(&self.tags)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganization {
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
    pub priority: Priority,
    pub status: OrganizationStatus,
    pub assignee: Option<String>,
    pub tags: String,
}

impl NewOrganization {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRole {
    Chairman,
    Director,
    Manager,
    Supervisor,
    Coordinator,
    Researcher,
    Officer,
    Representative,
    Other,
}

impl ContactRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactRole::Chairman => "chairman",
            ContactRole::Director => "director",
            ContactRole::Manager => "manager",
            ContactRole::Supervisor => "supervisor",
            ContactRole::Coordinator => "coordinator",
            ContactRole::Researcher => "researcher",
            ContactRole::Officer => "officer",
            ContactRole::Representative => "representative",
            ContactRole::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "chairman" => ContactRole::Chairman,
            "director" => ContactRole::Director,
            "manager" => ContactRole::Manager,
            "supervisor" => ContactRole::Supervisor,
            "coordinator" => ContactRole::Coordinator,
            "researcher" => ContactRole::Researcher,
            "officer" => ContactRole::Officer,
            "representative" => ContactRole::Representative,
            _ => ContactRole::Other,
        }
    }
}

/// A person inside an organization. At most one contact per organization
/// carries `is_primary`; the storage layer enforces the invariant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub role: Option<ContactRole>,
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

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub role: Option<ContactRole>,
    pub is_primary: bool,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub office_location: String,
    pub notes: String,
    pub key_info: String,
    pub is_active: bool,
}

impl NewContact {
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() && self.last_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "first_name".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Email,
    Phone,
    Meeting,
    #[default]
    Note,
    Proposal,
    FollowUp,
    Other,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Email => "email",
            InteractionType::Phone => "phone",
            InteractionType::Meeting => "meeting",
            InteractionType::Note => "note",
            InteractionType::Proposal => "proposal",
            InteractionType::FollowUp => "follow_up",
            InteractionType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "email" => InteractionType::Email,
            "phone" => InteractionType::Phone,
            "meeting" => InteractionType::Meeting,
            "proposal" => InteractionType::Proposal,
            "follow_up" => InteractionType::FollowUp,
            "other" => InteractionType::Other,
            _ => InteractionType::Note,
        }
    }
}

/// A logged touchpoint. Saving one stamps `last_contacted` on the
/// organization and, when a contact is attached, on the contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInteraction {
    pub id: String,
    pub contact_id: Option<String>,
    pub organization_id: String,
    pub interaction_type: InteractionType,
    pub subject: String,
    pub notes: String,
    pub interaction_date: NaiveDateTime,
    pub next_action: String,
    pub next_action_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactInteraction {
    pub contact_id: Option<String>,
    pub organization_id: String,
    pub interaction_type: InteractionType,
    pub subject: String,
    pub notes: String,
    pub interaction_date: NaiveDateTime,
    pub next_action: String,
    pub next_action_date: Option<NaiveDate>,
}

impl NewContactInteraction {
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "subject".to_string(),
            )));
        }
        Ok(())
    }
}

/// Organization list filters; equality matches AND together, the search
/// term ORs across name, description, location and tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationFilters {
    pub type_id: Option<String>,
    pub category_id: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<OrganizationStatus>,
    pub assignee: Option<String>,
    pub search: Option<String>,
}

/// Contact list filters; the search term ORs across name, email, title and
/// the organization name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilters {
    pub organization_id: Option<String>,
    pub role: Option<ContactRole>,
    pub is_primary: Option<bool>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

/// Organization list row with its contact headcount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationListItem {
    #[serde(flatten)]
    pub organization: Organization,
    pub contact_count: i64,
}

/// Organization detail payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDetail {
    pub organization: Organization,
    pub organization_type: Option<OrganizationType>,
    pub category: Option<ContactCategory>,
    pub contacts: Vec<Contact>,
    pub interactions: Vec<ContactInteraction>,
}

/// Contact detail payload. Interactions cover the contact itself plus any
/// logged against its organization without a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    pub contact: Contact,
    pub organization: Organization,
    pub interactions: Vec<ContactInteraction>,
}

/// Count of organizations at one priority level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: i64,
}

/// CRM dashboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmDashboard {
    pub total_organizations: i64,
    pub total_contacts: i64,
    pub active_organizations: i64,
    pub recent_interactions: Vec<ContactInteraction>,
    pub organizations_by_priority: Vec<PriorityCount>,
    pub upcoming_follow_ups: Vec<ContactInteraction>,
    pub recent_organizations: Vec<Organization>,
}
