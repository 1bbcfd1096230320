//! Site domain models.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Immutable process-wide site configuration, loaded once at startup from the
/// server environment. Replaces the original's scattered settings constants
/// (site name, social links, impact metrics).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_name: String,
    pub site_description: String,
    pub social_links: HashMap<String, String>,
    /// Headline impact numbers shown on the homepage (label -> value).
    pub impact_metrics: HashMap<String, serde_json::Value>,
    /// Fixed notification recipients for contact submissions.
    pub contact_emails: Vec<String>,
    /// Optional extra recipient, appended when not already present.
    pub extra_contact_email: Option<String>,
    pub from_email: String,
}

impl SiteConfig {
    /// All notification recipients, deduplicated.
    pub fn notification_recipients(&self) -> Vec<String> {
        let mut recipients = self.contact_emails.clone();
        if let Some(extra) = &self.extra_contact_email {
            if !recipients.iter().any(|r| r == extra) {
                recipients.push(extra.clone());
            }
        }
        recipients
    }
}

/// Admin-editable key/value setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSetting {
    pub id: String,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSiteSetting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

/// A company office, displayed in the site footer and contact page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficeLocation {
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

impl OfficeLocation {
    /// Comma-joined postal address, skipping empty parts.
    pub fn full_address(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.address_line1.is_empty() {
            parts.push(self.address_line1.clone());
        }
        if let Some(line2) = &self.address_line2 {
            if !line2.is_empty() {
                parts.push(line2.clone());
            }
        }
        let mut city_state = self.city.clone();
        if !self.state.is_empty() {
            city_state.push_str(&format!(", {}", self.state));
        }
        if !self.zip_code.is_empty() {
            city_state.push_str(&format!(" {}", self.zip_code));
        }
        if !city_state.is_empty() {
            parts.push(city_state);
        }
        if !self.country.is_empty() {
            parts.push(self.country.clone());
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOfficeLocation {
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

/// Lifecycle status of a company certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    #[default]
    Pending,
    Active,
    Expired,
}

impl CertificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationStatus::Pending => "pending",
            CertificationStatus::Active => "active",
            CertificationStatus::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "active" => CertificationStatus::Active,
            "expired" => CertificationStatus::Expired,
            _ => CertificationStatus::Pending,
        }
    }
}

/// Company certification or credential (8(a), WOSB, MBE, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub certification_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: CertificationStatus,
    pub display_order: i32,
    pub is_featured: bool,
}

impl Certification {
    pub fn is_active(&self) -> bool {
        self.status == CertificationStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCertification {
    pub name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub certification_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: CertificationStatus,
    pub display_order: i32,
    pub is_featured: bool,
}

/// Everything the presentation layer needs on every page: settings map,
/// offices, featured certifications. Mirrors the original context processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContext {
    pub site_name: String,
    pub site_description: String,
    pub social_links: HashMap<String, String>,
    pub settings: HashMap<String, String>,
    pub office_locations: Vec<OfficeLocation>,
    pub primary_location: Option<OfficeLocation>,
    pub featured_certifications: Vec<Certification>,
}
