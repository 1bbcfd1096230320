use chrono::{NaiveDate, NaiveDateTime};

use super::portfolio_model::{CaseStudy, ClientType, NewCaseStudy, NewCaseStudyImage};
use crate::errors::Error;

fn naive(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn case_study() -> CaseStudy {
    CaseStudy {
        id: "cs-1".to_string(),
        title: "Grid Resilience Study".to_string(),
        slug: "grid-resilience-study".to_string(),
        client_type: ClientType::Federal,
        client_name: "Dept of Energy".to_string(),
        offering_id: None,
        challenge: "Ageing distribution infrastructure".to_string(),
        solution: "Network modelling and phased upgrades".to_string(),
        results: "30% fewer outages".to_string(),
        technologies: "Python, PostGIS, , QGIS".to_string(),
        impact_metrics: "{}".to_string(),
        is_featured: false,
        is_published: true,
        published_date: naive(2025, 3, 1),
        meta_title: None,
        meta_description: None,
        created_at: naive(2025, 3, 1),
        updated_at: naive(2025, 3, 1),
    }
}

#[test]
fn test_technologies_list_skips_blanks() {
    let cs = case_study();
    assert_eq!(cs.technologies_list(), ["Python", "PostGIS", "QGIS"]);
}

#[test]
fn test_display_description_falls_back_to_challenge() {
    let mut cs = case_study();
    assert_eq!(cs.display_description(), "Ageing distribution infrastructure");

    cs.challenge = "x".repeat(250);
    let desc = cs.display_description();
    assert_eq!(desc.chars().count(), 203);
    assert!(desc.ends_with("..."));

    cs.meta_description = Some("Custom".to_string());
    assert_eq!(cs.display_description(), "Custom");
}

#[test]
fn test_client_type_parse_defaults_to_other() {
    assert_eq!(ClientType::parse("federal"), ClientType::Federal);
    assert_eq!(ClientType::parse("nonprofit"), ClientType::Other);
}

#[test]
fn test_new_case_study_requires_title_and_client() {
    let new = NewCaseStudy {
        title: "  ".to_string(),
        slug: None,
        client_type: ClientType::Corporate,
        client_name: "Acme".to_string(),
        offering_id: None,
        challenge: String::new(),
        solution: String::new(),
        results: String::new(),
        technologies: String::new(),
        impact_metrics: "{}".to_string(),
        is_featured: false,
        is_published: false,
        published_date: naive(2025, 1, 1),
        meta_title: None,
        meta_description: None,
    };
    assert!(matches!(new.validate(), Err(Error::Validation(_))));

    let new = NewCaseStudy {
        title: "Water Access Expansion".to_string(),
        client_name: String::new(),
        ..new
    };
    assert!(matches!(new.validate(), Err(Error::Validation(_))));

    let new = NewCaseStudy {
        client_name: "Acme".to_string(),
        ..new
    };
    assert!(new.validate().is_ok());
    assert_eq!(new.resolved_slug(), "water-access-expansion");
}

#[test]
fn test_image_alt_text_fallback_chain() {
    let mut image = NewCaseStudyImage {
        case_study_id: "cs-1".to_string(),
        image_path: "portfolio/grid.jpg".to_string(),
        caption: String::new(),
        alt_text: None,
        display_order: 2,
        is_primary: false,
    };
    assert_eq!(
        image.resolved_alt_text("Grid Resilience Study"),
        "Grid Resilience Study - Image 2"
    );

    image.caption = "Substation survey".to_string();
    assert_eq!(
        image.resolved_alt_text("Grid Resilience Study"),
        "Substation survey"
    );

    image.alt_text = Some("Engineers at a substation".to_string());
    assert_eq!(
        image.resolved_alt_text("Grid Resilience Study"),
        "Engineers at a substation"
    );
}
