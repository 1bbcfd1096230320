//! Case study domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::{slugify, split_comma_list, truncate_with_ellipsis};

/// Client sector a case study was delivered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    Federal,
    State,
    International,
    Corporate,
    Foundation,
    #[default]
    Other,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Federal => "federal",
            ClientType::State => "state",
            ClientType::International => "international",
            ClientType::Corporate => "corporate",
            ClientType::Foundation => "foundation",
            ClientType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClientType::Federal => "Federal Government",
            ClientType::State => "State & Local Government",
            ClientType::International => "International Organization",
            ClientType::Corporate => "Corporate",
            ClientType::Foundation => "Foundation & Non-profit",
            ClientType::Other => "Other",
        }
    }

    /// Parses the stored value. Unknown values map to `Other`.
    pub fn parse(value: &str) -> Self {
        match value {
            "federal" => ClientType::Federal,
            "state" => ClientType::State,
            "international" => ClientType::International,
            "corporate" => ClientType::Corporate,
            "foundation" => ClientType::Foundation,
            _ => ClientType::Other,
        }
    }
}

/// A published project write-up: the challenge, what was done, and the
/// measurable results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub client_type: ClientType,
    pub client_name: String,
    /// Offering this work falls under. Cleared when the offering is deleted.
    pub offering_id: Option<String>,
    pub challenge: String,
    pub solution: String,
    pub results: String,
    /// Comma-separated technology names.
    pub technologies: String,
    /// JSON object of headline numbers, stored verbatim.
    pub impact_metrics: String,
    pub is_featured: bool,
    pub is_published: bool,
    pub published_date: NaiveDateTime,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CaseStudy {
    /// SEO title, falling back to the plain title.
    pub fn display_title(&self) -> &str {
        match &self.meta_title {
            Some(t) if !t.is_empty() => t,
            _ => &self.title,
        }
    }

    /// SEO description, falling back to the challenge truncated to 200 chars.
    pub fn display_description(&self) -> String {
        match &self.meta_description {
            Some(d) if !d.is_empty() => d.clone(),
            _ => truncate_with_ellipsis(&self.challenge, 200),
        }
    }

    pub fn technologies_list(&self) -> Vec<String> {
        split_comma_list(&self.technologies)
    }

    pub fn absolute_url(&self) -> String {
        format!("/portfolio/{}/", self.slug)
    }
}

/// Input model for a new case study.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCaseStudy {
    pub title: String,
    pub slug: Option<String>,
    pub client_type: ClientType,
    pub client_name: String,
    pub offering_id: Option<String>,
    pub challenge: String,
    pub solution: String,
    pub results: String,
    pub technologies: String,
    pub impact_metrics: String,
    pub is_featured: bool,
    pub is_published: bool,
    pub published_date: NaiveDateTime,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl NewCaseStudy {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if self.client_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "client_name".to_string(),
            )));
        }
        Ok(())
    }

    pub fn resolved_slug(&self) -> String {
        match &self.slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&self.title),
        }
    }
}

/// A gallery image attached to a case study. Deleted with its parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyImage {
    pub id: String,
    pub case_study_id: String,
    pub image_path: String,
    pub caption: String,
    pub alt_text: String,
    pub display_order: i32,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCaseStudyImage {
    pub case_study_id: String,
    pub image_path: String,
    pub caption: String,
    pub alt_text: Option<String>,
    pub display_order: i32,
    pub is_primary: bool,
}

impl NewCaseStudyImage {
    /// Alt text to persist: explicit, else the caption, else a positional
    /// fallback built from the case study title.
    pub fn resolved_alt_text(&self, case_study_title: &str) -> String {
        match &self.alt_text {
            Some(a) if !a.trim().is_empty() => a.trim().to_string(),
            _ if !self.caption.trim().is_empty() => self.caption.trim().to_string(),
            _ => format!("{} - Image {}", case_study_title, self.display_order),
        }
    }
}

/// A client quote attached to a case study. Deleted with its parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyTestimonial {
    pub id: String,
    pub case_study_id: String,
    pub quote: String,
    pub author_name: String,
    pub author_title: String,
    pub author_organization: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCaseStudyTestimonial {
    pub case_study_id: String,
    pub quote: String,
    pub author_name: String,
    pub author_title: String,
    pub author_organization: String,
    pub display_order: i32,
}

/// Optional query filters for the public list. Filters AND together; the
/// search term ORs across title, narrative fields, technologies and client
/// name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyFilters {
    pub client_type: Option<ClientType>,
    pub offering_slug: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

/// Detail payload: the case study with its attachments and related work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyDetail {
    pub case_study: CaseStudy,
    pub images: Vec<CaseStudyImage>,
    pub testimonials: Vec<CaseStudyTestimonial>,
    pub related_case_studies: Vec<CaseStudy>,
    pub technologies: Vec<String>,
}
