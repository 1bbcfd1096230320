use chrono::NaiveDate;

use super::crm_model::{
    Contact, ContactRole, InteractionType, NewContact, NewOrganization, Organization,
    OrganizationStatus,
};
use crate::errors::Error;
use crate::plan::Priority;

fn contact(first: &str, last: &str) -> Contact {
    let now = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    Contact {
        id: "c-1".to_string(),
        organization_id: "org-1".to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        title: String::new(),
        role: None,
        is_primary: false,
        email: String::new(),
        phone: String::new(),
        mobile: String::new(),
        office_location: String::new(),
        notes: String::new(),
        key_info: String::new(),
        is_active: true,
        last_contacted: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_full_name_trims_missing_parts() {
    assert_eq!(contact("Amina", "Odhiambo").full_name(), "Amina Odhiambo");
    assert_eq!(contact("Amina", "").full_name(), "Amina");
    assert_eq!(contact("", "Odhiambo").full_name(), "Odhiambo");
}

#[test]
fn test_organization_tags_list() {
    let now = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let org = Organization {
        id: "org-1".to_string(),
        name: "County Water Board".to_string(),
        type_id: None,
        category_id: None,
        website: String::new(),
        email: String::new(),
        phone: String::new(),
        address: String::new(),
        location: String::new(),
        description: String::new(),
        key_notes: String::new(),
        contact_strategy: String::new(),
        priority: Priority::High,
        status: OrganizationStatus::Prospect,
        assignee: None,
        tags: "water, infrastructure ,".to_string(),
        last_contacted: None,
        created_at: now,
        updated_at: now,
    };
    assert_eq!(org.tags_list(), ["water", "infrastructure"]);
}

#[test]
fn test_new_contact_requires_a_name() {
    let new = NewContact {
        organization_id: "org-1".to_string(),
        first_name: " ".to_string(),
        last_name: String::new(),
        title: String::new(),
        role: Some(ContactRole::Director),
        is_primary: true,
        email: String::new(),
        phone: String::new(),
        mobile: String::new(),
        office_location: String::new(),
        notes: String::new(),
        key_info: String::new(),
        is_active: true,
    };
    assert!(matches!(new.validate(), Err(Error::Validation(_))));
    let new = NewContact {
        last_name: "Odhiambo".to_string(),
        ..new
    };
    assert!(new.validate().is_ok());
}

#[test]
fn test_new_organization_requires_a_name() {
    let new = NewOrganization {
        name: String::new(),
        type_id: None,
        category_id: None,
        website: String::new(),
        email: String::new(),
        phone: String::new(),
        address: String::new(),
        location: String::new(),
        description: String::new(),
        key_notes: String::new(),
        contact_strategy: String::new(),
        priority: Priority::Medium,
        status: OrganizationStatus::Prospect,
        assignee: None,
        tags: String::new(),
    };
    assert!(matches!(new.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_enum_labels_round_trip() {
    assert_eq!(ContactRole::parse("director"), ContactRole::Director);
    assert_eq!(ContactRole::parse("unknown"), ContactRole::Other);
    assert_eq!(InteractionType::parse("follow_up"), InteractionType::FollowUp);
    assert_eq!(InteractionType::parse("junk"), InteractionType::Note);
    assert_eq!(OrganizationStatus::parse("partner"), OrganizationStatus::Partner);
    assert_eq!(OrganizationStatus::parse("junk"), OrganizationStatus::Prospect);
}
