//! Contact-form submissions and capability-statement download tracking.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{MESSAGE_MAX_LEN, MESSAGE_MIN_LEN};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::looks_like_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Engineering,
    DataScience,
    Research,
    International,
    CapacityBuilding,
    #[default]
    Other,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Engineering => "engineering",
            ProjectType::DataScience => "data_science",
            ProjectType::Research => "research",
            ProjectType::International => "international",
            ProjectType::CapacityBuilding => "capacity_building",
            ProjectType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "engineering" => ProjectType::Engineering,
            "data_science" => ProjectType::DataScience,
            "research" => ProjectType::Research,
            "international" => ProjectType::International,
            "capacity_building" => ProjectType::CapacityBuilding,
            _ => ProjectType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetRange {
    #[serde(rename = "under_50k")]
    Under50k,
    #[serde(rename = "50k_100k")]
    Range50k100k,
    #[serde(rename = "100k_250k")]
    Range100k250k,
    #[serde(rename = "250k_500k")]
    Range250k500k,
    #[serde(rename = "500k_1m")]
    Range500k1m,
    #[serde(rename = "over_1m")]
    Over1m,
    #[default]
    NotSpecified,
}

impl BudgetRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Under50k => "under_50k",
            BudgetRange::Range50k100k => "50k_100k",
            BudgetRange::Range100k250k => "100k_250k",
            BudgetRange::Range250k500k => "250k_500k",
            BudgetRange::Range500k1m => "500k_1m",
            BudgetRange::Over1m => "over_1m",
            BudgetRange::NotSpecified => "not_specified",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "under_50k" => BudgetRange::Under50k,
            "50k_100k" => BudgetRange::Range50k100k,
            "100k_250k" => BudgetRange::Range100k250k,
            "250k_500k" => BudgetRange::Range250k500k,
            "500k_1m" => BudgetRange::Range500k1m,
            "over_1m" => BudgetRange::Over1m,
            _ => BudgetRange::NotSpecified,
        }
    }
}

/// A stored contact-form submission.
///
/// Read and responded are two independent, reversible flags, each with its
/// own timestamp. They are not a workflow state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub project_type: ProjectType,
    pub message: String,
    pub budget_range: BudgetRange,
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

/// Form payload for a new submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub project_type: ProjectType,
    pub message: String,
    #[serde(default)]
    pub budget_range: BudgetRange,
}

impl NewContactSubmission {
    /// Rejects empty name/email, malformed email addresses, messages whose
    /// trimmed length is under 10 and messages over 5000 characters.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "email address is not valid".to_string(),
            )));
        }
        let trimmed = self.message.trim().chars().count();
        if trimmed < MESSAGE_MIN_LEN {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "message must be at least {} characters",
                MESSAGE_MIN_LEN
            ))));
        }
        if self.message.chars().count() > MESSAGE_MAX_LEN {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "message must be at most {} characters",
                MESSAGE_MAX_LEN
            ))));
        }
        Ok(())
    }
}

/// Request metadata captured alongside a submission or download.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referer: String,
}

/// Submission result. `warning` is set when the stored submission could not
/// be announced by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub submission: ContactSubmission,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    General,
    Federal,
    International,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::General => "general",
            DocumentType::Federal => "federal",
            DocumentType::International => "international",
        }
    }

    /// Strict parse; unknown types are a lookup failure, not a default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "general" => Some(DocumentType::General),
            "federal" => Some(DocumentType::Federal),
            "international" => Some(DocumentType::International),
            _ => None,
        }
    }

    /// File name of the statement served for this type.
    pub fn file_name(&self) -> String {
        format!("{}_capability_statement.pdf", self.as_str())
    }
}

/// One tracked capability-statement download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDownload {
    pub id: String,
    pub document_type: DocumentType,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referer: String,
    pub downloaded_at: NaiveDateTime,
}

/// Optional submission list filters for the internal inbox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFilters {
    pub is_read: Option<bool>,
    pub is_responded: Option<bool>,
    pub project_type: Option<ProjectType>,
}
