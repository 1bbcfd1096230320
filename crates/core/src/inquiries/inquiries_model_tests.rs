use super::inquiries_model::{BudgetRange, DocumentType, NewContactSubmission, ProjectType};
use crate::errors::Error;

fn submission(message: &str) -> NewContactSubmission {
    NewContactSubmission {
        name: "Amina Odhiambo".to_string(),
        email: "amina@example.org".to_string(),
        organization: String::new(),
        project_type: ProjectType::Engineering,
        message: message.to_string(),
        budget_range: BudgetRange::NotSpecified,
    }
}

#[test]
fn test_message_length_bounds() {
    assert!(matches!(
        submission(&"x".repeat(9)).validate(),
        Err(Error::Validation(_))
    ));
    assert!(submission(&"x".repeat(10)).validate().is_ok());
    assert!(submission(&"x".repeat(5000)).validate().is_ok());
    assert!(matches!(
        submission(&"x".repeat(5001)).validate(),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_trimmed_length_is_what_counts_for_the_minimum() {
    // 12 raw characters but only 8 after trimming.
    assert!(matches!(
        submission("  12345678  ").validate(),
        Err(Error::Validation(_))
    ));
    assert!(submission("  1234567890  ").validate().is_ok());
}

#[test]
fn test_name_and_email_are_required() {
    let mut s = submission("a valid message");
    s.name = "  ".to_string();
    assert!(matches!(s.validate(), Err(Error::Validation(_))));

    let mut s = submission("a valid message");
    s.email = String::new();
    assert!(matches!(s.validate(), Err(Error::Validation(_))));

    let mut s = submission("a valid message");
    s.email = "not-an-email".to_string();
    assert!(matches!(s.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_budget_range_labels() {
    assert_eq!(BudgetRange::parse("50k_100k"), BudgetRange::Range50k100k);
    assert_eq!(BudgetRange::parse("over_1m"), BudgetRange::Over1m);
    assert_eq!(BudgetRange::parse("a lot"), BudgetRange::NotSpecified);
    assert_eq!(BudgetRange::Range500k1m.as_str(), "500k_1m");
}

#[test]
fn test_document_type_parse_is_strict() {
    assert_eq!(DocumentType::parse("federal"), Some(DocumentType::Federal));
    assert_eq!(DocumentType::parse("bogus"), None);
    assert_eq!(
        DocumentType::Federal.file_name(),
        "federal_capability_statement.pdf"
    );
}
