//! Service catalog domain models.
//!
//! The entity is named `ServiceOffering` rather than `Service` so that the
//! service-layer naming (`OfferingService`) stays unambiguous.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::slugify;

/// A consulting capability area shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub full_description: String,
    /// Heroicon name used by the frontend (e.g. "chart-bar").
    pub icon: String,
    pub display_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ServiceOffering {
    /// SEO title, falling back to the plain title.
    pub fn display_title(&self) -> &str {
        match &self.meta_title {
            Some(t) if !t.is_empty() => t,
            _ => &self.title,
        }
    }

    /// SEO description, falling back to the short description.
    pub fn display_description(&self) -> &str {
        match &self.meta_description {
            Some(d) if !d.is_empty() => d,
            _ => &self.short_description,
        }
    }
}

/// Input model for creating an offering. A blank slug is generated from the
/// title on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceOffering {
    pub title: String,
    pub slug: Option<String>,
    pub short_description: String,
    pub full_description: String,
    pub icon: String,
    pub display_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl NewServiceOffering {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if self.short_description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "short_description".to_string(),
            )));
        }
        Ok(())
    }

    /// The slug to persist: explicit when given, otherwise derived.
    pub fn resolved_slug(&self) -> String {
        match &self.slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&self.title),
        }
    }
}

/// A bullet-point capability within an offering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferingFeature {
    pub id: String,
    pub offering_id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOfferingFeature {
    pub offering_id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

/// Optional query filters for the public list. Filters AND together; the
/// search term ORs across title and both descriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingFilters {
    pub featured: Option<bool>,
    pub search: Option<String>,
}

/// Detail payload: the offering plus its features and sibling offerings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingDetail {
    pub offering: ServiceOffering,
    pub features: Vec<OfferingFeature>,
    pub other_offerings: Vec<ServiceOffering>,
}
