//! Database models for contact submissions and download tracking.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use meridian_core::constants::{REFERER_MAX_LEN, USER_AGENT_MAX_LEN};
use meridian_core::inquiries::{
    BudgetRange, CapabilityDownload, ContactSubmission, DocumentType, NewContactSubmission,
    ProjectType, RequestMeta,
};
use meridian_core::utils::truncate_chars;

/// Database model for contact submissions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contact_submissions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub project_type: String,
    pub message: String,
    pub budget_range: String,
    pub is_read: bool,
    pub read_at: Option<NaiveDateTime>,
    pub is_responded: bool,
    pub responded_at: Option<NaiveDateTime>,
    pub notes: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub submitted_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contact_submissions)]
#[serde(rename_all = "camelCase")]
pub struct NewContactSubmissionDB {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub project_type: String,
    pub message: String,
    pub budget_range: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
}

impl NewContactSubmissionDB {
    /// Builds the row, clamping the request metadata to its column budgets.
    pub fn from_parts(submission: NewContactSubmission, meta: RequestMeta) -> Self {
        Self {
            id: None,
            name: submission.name,
            email: submission.email,
            organization: submission.organization,
            project_type: submission.project_type.as_str().to_string(),
            message: submission.message,
            budget_range: submission.budget_range.as_str().to_string(),
            ip_address: meta.ip_address,
            user_agent: truncate_chars(&meta.user_agent, USER_AGENT_MAX_LEN),
        }
    }
}

/// Database model for capability statement downloads
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::capability_downloads)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDownloadDB {
    pub id: String,
    pub document_type: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referer: String,
    pub downloaded_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::capability_downloads)]
#[serde(rename_all = "camelCase")]
pub struct NewCapabilityDownloadDB {
    pub id: Option<String>,
    pub document_type: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referer: String,
}

impl NewCapabilityDownloadDB {
    pub fn from_parts(document_type: DocumentType, meta: RequestMeta) -> Self {
        Self {
            id: None,
            document_type: document_type.as_str().to_string(),
            ip_address: meta.ip_address,
            user_agent: truncate_chars(&meta.user_agent, USER_AGENT_MAX_LEN),
            referer: truncate_chars(&meta.referer, REFERER_MAX_LEN),
        }
    }
}

// Conversion to domain models
impl From<ContactSubmissionDB> for ContactSubmission {
    fn from(db: ContactSubmissionDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            organization: db.organization,
            project_type: ProjectType::parse(&db.project_type),
            message: db.message,
            budget_range: BudgetRange::parse(&db.budget_range),
            is_read: db.is_read,
            read_at: db.read_at,
            is_responded: db.is_responded,
            responded_at: db.responded_at,
            notes: db.notes,
            ip_address: db.ip_address,
            user_agent: db.user_agent,
            submitted_at: db.submitted_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<CapabilityDownloadDB> for CapabilityDownload {
    fn from(db: CapabilityDownloadDB) -> Self {
        Self {
            id: db.id,
            // Rows only ever carry valid labels; fall back rather than fail.
            document_type: DocumentType::parse(&db.document_type)
                .unwrap_or(DocumentType::General),
            ip_address: db.ip_address,
            user_agent: db.user_agent,
            referer: db.referer,
            downloaded_at: db.downloaded_at,
        }
    }
}
