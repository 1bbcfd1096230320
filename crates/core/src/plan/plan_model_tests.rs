use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::plan_model::{
    CertificationTracking, FinancialMetric, MetricType, Milestone, MilestonePeriod,
    MilestoneStatus, NewOpportunity, Opportunity, OpportunityStatus, PeriodType, Priority,
    TrackingStatus,
};
use crate::errors::Error;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn datetime(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
}

fn milestone(status: MilestoneStatus) -> Milestone {
    Milestone {
        id: "m-1".to_string(),
        period_id: "p-1".to_string(),
        title: "SAM registration".to_string(),
        description: String::new(),
        status,
        priority: Priority::High,
        target_date: date(2025, 6, 30),
        completed_date: None,
        assignee: None,
        notes: String::new(),
        display_order: 0,
        created_at: datetime(2025, 1, 1),
        updated_at: datetime(2025, 1, 1),
    }
}

fn metric(target: Option<Decimal>, actual: Option<Decimal>) -> FinancialMetric {
    FinancialMetric {
        id: "f-1".to_string(),
        metric_type: MetricType::Revenue,
        period_type: PeriodType::Monthly,
        period_start: date(2025, 1, 1),
        target_value: target,
        actual_value: actual,
        notes: String::new(),
        created_at: datetime(2025, 1, 1),
        updated_at: datetime(2025, 1, 1),
    }
}

fn opportunity(estimated: Option<Decimal>, win_probability: i32) -> Opportunity {
    Opportunity {
        id: "o-1".to_string(),
        title: "State DOT modelling".to_string(),
        description: String::new(),
        client_name: "DOT".to_string(),
        agency: String::new(),
        status: OpportunityStatus::Proposal,
        priority: Priority::Medium,
        estimated_value: estimated,
        win_probability,
        expected_close_date: None,
        proposal_submitted_date: None,
        award_date: None,
        actual_value: None,
        notes: String::new(),
        assignee: None,
        created_at: datetime(2025, 1, 1),
        updated_at: datetime(2025, 1, 1),
    }
}

#[test]
fn test_milestone_progress_from_tasks() {
    let m = milestone(MilestoneStatus::InProgress);
    assert_eq!(m.progress_percentage(0, 4), 0);
    assert_eq!(m.progress_percentage(1, 3), 33);
    assert_eq!(m.progress_percentage(2, 3), 66);
    assert_eq!(m.progress_percentage(4, 4), 100);
}

#[test]
fn test_milestone_progress_fallback_without_tasks() {
    assert_eq!(milestone(MilestoneStatus::NotStarted).progress_percentage(0, 0), 0);
    assert_eq!(milestone(MilestoneStatus::InProgress).progress_percentage(0, 0), 50);
    assert_eq!(milestone(MilestoneStatus::Completed).progress_percentage(0, 0), 100);
    // Statuses other than the first two all fall through to 100.
    assert_eq!(milestone(MilestoneStatus::AtRisk).progress_percentage(0, 0), 100);
    assert_eq!(milestone(MilestoneStatus::Blocked).progress_percentage(0, 0), 100);
}

#[test]
fn test_milestone_overdue() {
    let m = milestone(MilestoneStatus::InProgress);
    assert!(!m.is_overdue(date(2025, 6, 30)));
    assert!(m.is_overdue(date(2025, 7, 1)));
    assert!(!milestone(MilestoneStatus::Completed).is_overdue(date(2025, 7, 1)));
}

#[test]
fn test_period_progress() {
    let period = MilestonePeriod {
        id: "p-1".to_string(),
        name: "FY25 Q2".to_string(),
        description: String::new(),
        start_date: date(2025, 4, 1),
        end_date: date(2025, 6, 30),
        display_order: 0,
    };
    assert_eq!(period.progress_percentage(&[]), 0);
    let milestones = vec![
        milestone(MilestoneStatus::Completed),
        milestone(MilestoneStatus::InProgress),
        milestone(MilestoneStatus::NotStarted),
    ];
    assert_eq!(period.progress_percentage(&milestones), 33);
}

#[test]
fn test_metric_variance_rules() {
    assert_eq!(metric(Some(dec!(100)), Some(dec!(120))).variance(), Some(dec!(20)));
    assert_eq!(metric(Some(dec!(100)), Some(dec!(80))).variance(), Some(dec!(-20)));
    assert_eq!(metric(None, Some(dec!(80))).variance(), None);
    assert_eq!(metric(Some(dec!(100)), None).variance(), None);

    assert_eq!(
        metric(Some(dec!(100)), Some(dec!(120))).variance_percentage(),
        Some(dec!(20))
    );
    assert_eq!(metric(Some(dec!(0)), Some(dec!(120))).variance_percentage(), None);
    assert_eq!(metric(None, Some(dec!(120))).variance_percentage(), None);
}

#[test]
fn test_metric_progress_caps_at_100() {
    assert_eq!(
        metric(Some(dec!(200)), Some(dec!(50))).progress_percentage(),
        Some(dec!(25))
    );
    assert_eq!(
        metric(Some(dec!(100)), Some(dec!(250))).progress_percentage(),
        Some(dec!(100))
    );
    assert_eq!(
        metric(Some(dec!(100)), None).progress_percentage(),
        Some(Decimal::ZERO)
    );
    assert_eq!(metric(Some(dec!(0)), Some(dec!(50))).progress_percentage(), None);
    assert_eq!(metric(None, Some(dec!(50))).progress_percentage(), None);
}

#[test]
fn test_opportunity_weighted_value() {
    assert_eq!(opportunity(Some(dec!(250000)), 40).weighted_value(), Some(dec!(100000)));
    assert_eq!(opportunity(Some(dec!(250000)), 0).weighted_value(), Some(dec!(0)));
    assert_eq!(opportunity(None, 40).weighted_value(), None);
}

#[test]
fn test_opportunity_active_statuses() {
    let mut o = opportunity(None, 50);
    assert!(o.is_active());
    for status in [
        OpportunityStatus::Won,
        OpportunityStatus::Lost,
        OpportunityStatus::Cancelled,
    ] {
        o.status = status;
        assert!(!o.is_active());
    }
}

#[test]
fn test_opportunity_win_probability_bounds() {
    let new = NewOpportunity {
        title: "Bid".to_string(),
        description: String::new(),
        client_name: String::new(),
        agency: String::new(),
        status: OpportunityStatus::Prospecting,
        priority: Priority::Medium,
        estimated_value: None,
        win_probability: 101,
        expected_close_date: None,
        proposal_submitted_date: None,
        award_date: None,
        actual_value: None,
        notes: String::new(),
        assignee: None,
    };
    assert!(matches!(new.validate(), Err(Error::Validation(_))));
    let new = NewOpportunity { win_probability: 100, ..new };
    assert!(new.validate().is_ok());
}

fn tracking(status: TrackingStatus, target: Option<NaiveDate>) -> CertificationTracking {
    CertificationTracking {
        id: "ct-1".to_string(),
        certification_id: None,
        name: "8(a) Business Development".to_string(),
        status,
        priority: Priority::Critical,
        target_submission_date: target,
        submission_date: None,
        expected_approval_date: None,
        approval_date: None,
        notes: String::new(),
        assignee: None,
        created_at: datetime(2025, 1, 1),
        updated_at: datetime(2025, 1, 1),
    }
}

#[test]
fn test_tracking_overdue_exemptions() {
    let target = Some(date(2025, 5, 1));
    let today = date(2025, 6, 1);

    assert!(tracking(TrackingStatus::NotStarted, target).is_overdue(today));
    assert!(tracking(TrackingStatus::ApplicationPrep, target).is_overdue(today));
    // "application_submitted" is not on the exempt list (the list says
    // "submitted"), so a submitted application still counts as overdue.
    assert!(tracking(TrackingStatus::ApplicationSubmitted, target).is_overdue(today));

    assert!(!tracking(TrackingStatus::UnderReview, target).is_overdue(today));
    assert!(!tracking(TrackingStatus::Approved, target).is_overdue(today));
    assert!(!tracking(TrackingStatus::Active, target).is_overdue(today));

    assert!(!tracking(TrackingStatus::NotStarted, None).is_overdue(today));
    assert!(!tracking(TrackingStatus::NotStarted, target).is_overdue(date(2025, 4, 1)));
}

#[test]
fn test_priority_rank_ordering() {
    assert!(Priority::Critical.rank() > Priority::High.rank());
    assert!(Priority::High.rank() > Priority::Medium.rank());
    assert!(Priority::Medium.rank() > Priority::Low.rank());
    assert_eq!(Priority::parse("unknown"), Priority::Medium);
}
