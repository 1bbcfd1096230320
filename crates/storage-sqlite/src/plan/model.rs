//! Database models for the business-plan tracker.
//!
//! Decimal columns are stored as TEXT; unparseable values read back as
//! `None` rather than failing the whole row.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_core::plan::{
    CertificationTracking, FinancialMetric, MetricType, Milestone, MilestonePeriod,
    MilestoneStatus, NewCertificationTracking, NewFinancialMetric, NewMilestone,
    NewMilestonePeriod, NewOpportunity, NewPlanTask, Opportunity, OpportunityStatus, PeriodType,
    PlanTask, Priority, TaskStatus, TrackingStatus,
};

pub(crate) fn parse_decimal(value: Option<String>) -> Option<Decimal> {
    value.and_then(|v| Decimal::from_str(&v).ok())
}

pub(crate) fn decimal_to_text(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

/// Database model for milestone periods
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
#[diesel(table_name = crate::schema::milestone_periods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MilestonePeriodDB {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display_order: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::milestone_periods)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestonePeriodDB {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display_order: i32,
}

/// Database model for milestones
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::milestones)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDB {
    pub id: String,
    pub period_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub target_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub notes: String,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::milestones)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestoneDB {
    pub id: Option<String>,
    pub period_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub target_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub notes: String,
    pub display_order: i32,
}

/// Update changeset for milestones. `treat_none_as_null` lets an update
/// clear the optional date and assignee columns.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::milestones)]
#[diesel(treat_none_as_null = true)]
pub struct MilestoneChangeset {
    pub period_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub target_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub notes: String,
    pub display_order: i32,
    pub updated_at: NaiveDateTime,
}

/// Database model for plan tasks
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::plan_tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PlanTaskDB {
    pub id: String,
    pub milestone_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::plan_tasks)]
#[serde(rename_all = "camelCase")]
pub struct NewPlanTaskDB {
    pub id: Option<String>,
    pub milestone_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub display_order: i32,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::plan_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct PlanTaskChangeset {
    pub milestone_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub display_order: i32,
    pub updated_at: NaiveDateTime,
}

/// Database model for financial metrics
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::financial_metrics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetricDB {
    pub id: String,
    pub metric_type: String,
    pub period_type: String,
    pub period_start: NaiveDate,
    pub target_value: Option<String>,
    pub actual_value: Option<String>,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::financial_metrics)]
#[serde(rename_all = "camelCase")]
pub struct NewFinancialMetricDB {
    pub id: Option<String>,
    pub metric_type: String,
    pub period_type: String,
    pub period_start: NaiveDate,
    pub target_value: Option<String>,
    pub actual_value: Option<String>,
    pub notes: String,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::financial_metrics)]
#[diesel(treat_none_as_null = true)]
pub struct FinancialMetricChangeset {
    pub metric_type: String,
    pub period_type: String,
    pub period_start: NaiveDate,
    pub target_value: Option<String>,
    pub actual_value: Option<String>,
    pub notes: String,
    pub updated_at: NaiveDateTime,
}

/// Database model for pipeline opportunities
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::opportunities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct OpportunityDB {
    pub id: String,
    pub title: String,
    pub description: String,
    pub client_name: String,
    pub agency: String,
    pub status: String,
    pub priority: String,
    pub estimated_value: Option<String>,
    pub win_probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub proposal_submitted_date: Option<NaiveDate>,
    pub award_date: Option<NaiveDate>,
    pub actual_value: Option<String>,
    pub notes: String,
    pub assignee: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::opportunities)]
#[serde(rename_all = "camelCase")]
pub struct NewOpportunityDB {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub client_name: String,
    pub agency: String,
    pub status: String,
    pub priority: String,
    pub estimated_value: Option<String>,
    pub win_probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub proposal_submitted_date: Option<NaiveDate>,
    pub award_date: Option<NaiveDate>,
    pub actual_value: Option<String>,
    pub notes: String,
    pub assignee: Option<String>,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::opportunities)]
#[diesel(treat_none_as_null = true)]
pub struct OpportunityChangeset {
    pub title: String,
    pub description: String,
    pub client_name: String,
    pub agency: String,
    pub status: String,
    pub priority: String,
    pub estimated_value: Option<String>,
    pub win_probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub proposal_submitted_date: Option<NaiveDate>,
    pub award_date: Option<NaiveDate>,
    pub actual_value: Option<String>,
    pub notes: String,
    pub assignee: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Database model for certification tracking rows
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::certification_tracking)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CertificationTrackingDB {
    pub id: String,
    pub certification_id: Option<String>,
    pub name: String,
    pub status: String,
    pub priority: String,
    pub target_submission_date: Option<NaiveDate>,
    pub submission_date: Option<NaiveDate>,
    pub expected_approval_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub notes: String,
    pub assignee: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::certification_tracking)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificationTrackingDB {
    pub id: Option<String>,
    pub certification_id: Option<String>,
    pub name: String,
    pub status: String,
    pub priority: String,
    pub target_submission_date: Option<NaiveDate>,
    pub submission_date: Option<NaiveDate>,
    pub expected_approval_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub notes: String,
    pub assignee: Option<String>,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::certification_tracking)]
#[diesel(treat_none_as_null = true)]
pub struct CertificationTrackingChangeset {
    pub certification_id: Option<String>,
    pub name: String,
    pub status: String,
    pub priority: String,
    pub target_submission_date: Option<NaiveDate>,
    pub submission_date: Option<NaiveDate>,
    pub expected_approval_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub notes: String,
    pub assignee: Option<String>,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<MilestonePeriodDB> for MilestonePeriod {
    fn from(db: MilestonePeriodDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            start_date: db.start_date,
            end_date: db.end_date,
            display_order: db.display_order,
        }
    }
}

impl From<NewMilestonePeriod> for NewMilestonePeriodDB {
    fn from(domain: NewMilestonePeriod) -> Self {
        Self {
            id: None,
            name: domain.name,
            description: domain.description,
            start_date: domain.start_date,
            end_date: domain.end_date,
            display_order: domain.display_order,
        }
    }
}

impl From<MilestoneDB> for Milestone {
    fn from(db: MilestoneDB) -> Self {
        Self {
            id: db.id,
            period_id: db.period_id,
            title: db.title,
            description: db.description,
            status: MilestoneStatus::parse(&db.status),
            priority: Priority::parse(&db.priority),
            target_date: db.target_date,
            completed_date: db.completed_date,
            assignee: db.assignee,
            notes: db.notes,
            display_order: db.display_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewMilestone> for NewMilestoneDB {
    fn from(domain: NewMilestone) -> Self {
        Self {
            id: None,
            period_id: domain.period_id,
            title: domain.title,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            target_date: domain.target_date,
            completed_date: domain.completed_date,
            assignee: domain.assignee,
            notes: domain.notes,
            display_order: domain.display_order,
        }
    }
}

impl From<NewMilestone> for MilestoneChangeset {
    fn from(domain: NewMilestone) -> Self {
        Self {
            period_id: domain.period_id,
            title: domain.title,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            target_date: domain.target_date,
            completed_date: domain.completed_date,
            assignee: domain.assignee,
            notes: domain.notes,
            display_order: domain.display_order,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<PlanTaskDB> for PlanTask {
    fn from(db: PlanTaskDB) -> Self {
        Self {
            id: db.id,
            milestone_id: db.milestone_id,
            title: db.title,
            description: db.description,
            status: TaskStatus::parse(&db.status),
            due_date: db.due_date,
            completed_date: db.completed_date,
            assignee: db.assignee,
            display_order: db.display_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewPlanTask> for NewPlanTaskDB {
    fn from(domain: NewPlanTask) -> Self {
        Self {
            id: None,
            milestone_id: domain.milestone_id,
            title: domain.title,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            due_date: domain.due_date,
            completed_date: domain.completed_date,
            assignee: domain.assignee,
            display_order: domain.display_order,
        }
    }
}

impl From<NewPlanTask> for PlanTaskChangeset {
    fn from(domain: NewPlanTask) -> Self {
        Self {
            milestone_id: domain.milestone_id,
            title: domain.title,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            due_date: domain.due_date,
            completed_date: domain.completed_date,
            assignee: domain.assignee,
            display_order: domain.display_order,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<FinancialMetricDB> for FinancialMetric {
    fn from(db: FinancialMetricDB) -> Self {
        Self {
            id: db.id,
            metric_type: MetricType::parse(&db.metric_type),
            period_type: PeriodType::parse(&db.period_type),
            period_start: db.period_start,
            target_value: parse_decimal(db.target_value),
            actual_value: parse_decimal(db.actual_value),
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewFinancialMetric> for NewFinancialMetricDB {
    fn from(domain: NewFinancialMetric) -> Self {
        Self {
            id: None,
            metric_type: domain.metric_type.as_str().to_string(),
            period_type: domain.period_type.as_str().to_string(),
            period_start: domain.period_start,
            target_value: decimal_to_text(domain.target_value),
            actual_value: decimal_to_text(domain.actual_value),
            notes: domain.notes,
        }
    }
}

impl From<NewFinancialMetric> for FinancialMetricChangeset {
    fn from(domain: NewFinancialMetric) -> Self {
        Self {
            metric_type: domain.metric_type.as_str().to_string(),
            period_type: domain.period_type.as_str().to_string(),
            period_start: domain.period_start,
            target_value: decimal_to_text(domain.target_value),
            actual_value: decimal_to_text(domain.actual_value),
            notes: domain.notes,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<OpportunityDB> for Opportunity {
    fn from(db: OpportunityDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            client_name: db.client_name,
            agency: db.agency,
            status: OpportunityStatus::parse(&db.status),
            priority: Priority::parse(&db.priority),
            estimated_value: parse_decimal(db.estimated_value),
            win_probability: db.win_probability,
            expected_close_date: db.expected_close_date,
            proposal_submitted_date: db.proposal_submitted_date,
            award_date: db.award_date,
            actual_value: parse_decimal(db.actual_value),
            notes: db.notes,
            assignee: db.assignee,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewOpportunity> for NewOpportunityDB {
    fn from(domain: NewOpportunity) -> Self {
        Self {
            id: None,
            title: domain.title,
            description: domain.description,
            client_name: domain.client_name,
            agency: domain.agency,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            estimated_value: decimal_to_text(domain.estimated_value),
            win_probability: domain.win_probability,
            expected_close_date: domain.expected_close_date,
            proposal_submitted_date: domain.proposal_submitted_date,
            award_date: domain.award_date,
            actual_value: decimal_to_text(domain.actual_value),
            notes: domain.notes,
            assignee: domain.assignee,
        }
    }
}

impl From<NewOpportunity> for OpportunityChangeset {
    fn from(domain: NewOpportunity) -> Self {
        Self {
            title: domain.title,
            description: domain.description,
            client_name: domain.client_name,
            agency: domain.agency,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            estimated_value: decimal_to_text(domain.estimated_value),
            win_probability: domain.win_probability,
            expected_close_date: domain.expected_close_date,
            proposal_submitted_date: domain.proposal_submitted_date,
            award_date: domain.award_date,
            actual_value: decimal_to_text(domain.actual_value),
            notes: domain.notes,
            assignee: domain.assignee,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<CertificationTrackingDB> for CertificationTracking {
    fn from(db: CertificationTrackingDB) -> Self {
        Self {
            id: db.id,
            certification_id: db.certification_id,
            name: db.name,
            status: TrackingStatus::parse(&db.status),
            priority: Priority::parse(&db.priority),
            target_submission_date: db.target_submission_date,
            submission_date: db.submission_date,
            expected_approval_date: db.expected_approval_date,
            approval_date: db.approval_date,
            notes: db.notes,
            assignee: db.assignee,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewCertificationTracking> for NewCertificationTrackingDB {
    fn from(domain: NewCertificationTracking) -> Self {
        Self {
            id: None,
            certification_id: domain.certification_id,
            name: domain.name,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            target_submission_date: domain.target_submission_date,
            submission_date: domain.submission_date,
            expected_approval_date: domain.expected_approval_date,
            approval_date: domain.approval_date,
            notes: domain.notes,
            assignee: domain.assignee,
        }
    }
}

impl From<NewCertificationTracking> for CertificationTrackingChangeset {
    fn from(domain: NewCertificationTracking) -> Self {
        Self {
            certification_id: domain.certification_id,
            name: domain.name,
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            target_submission_date: domain.target_submission_date,
            submission_date: domain.submission_date,
            expected_approval_date: domain.expected_approval_date,
            approval_date: domain.approval_date,
            notes: domain.notes,
            assignee: domain.assignee,
            updated_at: Utc::now().naive_utc(),
        }
    }
}
