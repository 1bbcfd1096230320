//! Database models for portfolio case studies.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use meridian_core::portfolio::{
    CaseStudy, CaseStudyImage, CaseStudyTestimonial, ClientType, NewCaseStudy,
    NewCaseStudyTestimonial,
};

/// Database model for case studies. `client_type` is stored as plain text
/// and parsed into the domain enum on read.
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
#[diesel(table_name = crate::schema::case_studies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyDB {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub client_type: String,
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
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::case_studies)]
#[serde(rename_all = "camelCase")]
pub struct NewCaseStudyDB {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub client_type: String,
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

/// Database model for case study images
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
#[diesel(table_name = crate::schema::case_study_images)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyImageDB {
    pub id: String,
    pub case_study_id: String,
    pub image_path: String,
    pub caption: String,
    pub alt_text: String,
    pub display_order: i32,
    pub is_primary: bool,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::case_study_images)]
#[serde(rename_all = "camelCase")]
pub struct NewCaseStudyImageDB {
    pub id: Option<String>,
    pub case_study_id: String,
    pub image_path: String,
    pub caption: String,
    pub alt_text: String,
    pub display_order: i32,
    pub is_primary: bool,
}

/// Database model for case study testimonials
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
#[diesel(table_name = crate::schema::case_study_testimonials)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyTestimonialDB {
    pub id: String,
    pub case_study_id: String,
    pub quote: String,
    pub author_name: String,
    pub author_title: String,
    pub author_organization: String,
    pub display_order: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::case_study_testimonials)]
#[serde(rename_all = "camelCase")]
pub struct NewCaseStudyTestimonialDB {
    pub id: Option<String>,
    pub case_study_id: String,
    pub quote: String,
    pub author_name: String,
    pub author_title: String,
    pub author_organization: String,
    pub display_order: i32,
}

// Conversion to domain models
impl From<CaseStudyDB> for CaseStudy {
    fn from(db: CaseStudyDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            slug: db.slug,
            client_type: ClientType::parse(&db.client_type),
            client_name: db.client_name,
            offering_id: db.offering_id,
            challenge: db.challenge,
            solution: db.solution,
            results: db.results,
            technologies: db.technologies,
            impact_metrics: db.impact_metrics,
            is_featured: db.is_featured,
            is_published: db.is_published,
            published_date: db.published_date,
            meta_title: db.meta_title,
            meta_description: db.meta_description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewCaseStudy> for NewCaseStudyDB {
    fn from(domain: NewCaseStudy) -> Self {
        let slug = domain.resolved_slug();
        Self {
            id: None,
            title: domain.title,
            slug,
            client_type: domain.client_type.as_str().to_string(),
            client_name: domain.client_name,
            offering_id: domain.offering_id,
            challenge: domain.challenge,
            solution: domain.solution,
            results: domain.results,
            technologies: domain.technologies,
            impact_metrics: domain.impact_metrics,
            is_featured: domain.is_featured,
            is_published: domain.is_published,
            published_date: domain.published_date,
            meta_title: domain.meta_title,
            meta_description: domain.meta_description,
        }
    }
}

impl From<CaseStudyImageDB> for CaseStudyImage {
    fn from(db: CaseStudyImageDB) -> Self {
        Self {
            id: db.id,
            case_study_id: db.case_study_id,
            image_path: db.image_path,
            caption: db.caption,
            alt_text: db.alt_text,
            display_order: db.display_order,
            is_primary: db.is_primary,
        }
    }
}

impl From<CaseStudyTestimonialDB> for CaseStudyTestimonial {
    fn from(db: CaseStudyTestimonialDB) -> Self {
        Self {
            id: db.id,
            case_study_id: db.case_study_id,
            quote: db.quote,
            author_name: db.author_name,
            author_title: db.author_title,
            author_organization: db.author_organization,
            display_order: db.display_order,
        }
    }
}

impl From<NewCaseStudyTestimonial> for NewCaseStudyTestimonialDB {
    fn from(domain: NewCaseStudyTestimonial) -> Self {
        Self {
            id: None,
            case_study_id: domain.case_study_id,
            quote: domain.quote,
            author_name: domain.author_name,
            author_title: domain.author_title,
            author_organization: domain.author_organization,
            display_order: domain.display_order,
        }
    }
}
