//! Business-plan domain models: milestone periods, milestones, tasks,
//! financial metrics, the opportunity pipeline and certification tracking.
//!
//! Derived figures (progress, variance, weighted value) are pure functions
//! on the models. Percentages cap at 100 and divisions by zero or missing
//! operands yield `None`; none of them panic.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Shared priority scale, ranked critical > high > medium > low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "low" => Priority::Low,
            "high" => Priority::High,
            "critical" => Priority::Critical,
            _ => Priority::Medium,
        }
    }

    /// Numeric rank for descending-priority ordering.
    pub fn rank(&self) -> i32 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    AtRisk,
    Blocked,
}

impl MilestoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::NotStarted => "not_started",
            MilestoneStatus::InProgress => "in_progress",
            MilestoneStatus::Completed => "completed",
            MilestoneStatus::AtRisk => "at_risk",
            MilestoneStatus::Blocked => "blocked",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "in_progress" => MilestoneStatus::InProgress,
            "completed" => MilestoneStatus::Completed,
            "at_risk" => MilestoneStatus::AtRisk,
            "blocked" => MilestoneStatus::Blocked,
            _ => MilestoneStatus::NotStarted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "in_progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            "cancelled" => TaskStatus::Cancelled,
            _ => TaskStatus::NotStarted,
        }
    }
}

/// A planning window (quarter, year) that groups milestones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePeriod {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display_order: i32,
}

impl MilestonePeriod {
    /// Share of the period's milestones that are completed, as a whole
    /// percentage. A period with no milestones reports 0.
    pub fn progress_percentage(&self, milestones: &[Milestone]) -> i64 {
        let total = milestones.len() as i64;
        if total == 0 {
            return 0;
        }
        let completed = milestones
            .iter()
            .filter(|m| m.status == MilestoneStatus::Completed)
            .count() as i64;
        completed * 100 / total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestonePeriod {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display_order: i32,
}

/// A business-plan milestone inside a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub period_id: String,
    pub title: String,
    pub description: String,
    pub status: MilestoneStatus,
    pub priority: Priority,
    pub target_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub notes: String,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Milestone {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != MilestoneStatus::Completed && today > self.target_date
    }

    /// Progress from the milestone's tasks, as a whole percentage.
    ///
    /// With no tasks the status drives a coarse fallback: not_started is 0,
    /// in_progress is 50 and every other status reports 100, so an at_risk
    /// or blocked milestone without tasks reads as fully complete. That
    /// reading is intentional; downstream displays rely on it.
    pub fn progress_percentage(&self, completed_tasks: i64, total_tasks: i64) -> i64 {
        if total_tasks > 0 {
            return completed_tasks * 100 / total_tasks;
        }
        match self.status {
            MilestoneStatus::NotStarted => 0,
            MilestoneStatus::InProgress => 50,
            _ => 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestone {
    pub period_id: String,
    pub title: String,
    pub description: String,
    pub status: MilestoneStatus,
    pub priority: Priority,
    pub target_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub notes: String,
    pub display_order: i32,
}

impl NewMilestone {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        Ok(())
    }
}

/// A unit of work under a milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanTask {
    pub id: String,
    pub milestone_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlanTask {
    pub milestone_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub display_order: i32,
}

impl NewPlanTask {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Revenue,
    Expense,
    Profit,
    Margin,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Revenue => "revenue",
            MetricType::Expense => "expense",
            MetricType::Profit => "profit",
            MetricType::Margin => "margin",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "expense" => MetricType::Expense,
            "profit" => MetricType::Profit,
            "margin" => MetricType::Margin,
            _ => MetricType::Revenue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Monthly => "monthly",
            PeriodType::Quarterly => "quarterly",
            PeriodType::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "quarterly" => PeriodType::Quarterly,
            "yearly" => PeriodType::Yearly,
            _ => PeriodType::Monthly,
        }
    }
}

/// One target/actual pair for a metric and period. Unique per
/// (metric_type, period_type, period_start); the database enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetric {
    pub id: String,
    pub metric_type: MetricType,
    pub period_type: PeriodType,
    pub period_start: NaiveDate,
    pub target_value: Option<Decimal>,
    pub actual_value: Option<Decimal>,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FinancialMetric {
    /// Actual minus target; `None` unless both are set.
    pub fn variance(&self) -> Option<Decimal> {
        Some(self.actual_value? - self.target_value?)
    }

    /// Variance relative to the target; `None` when the target is unset
    /// or zero.
    pub fn variance_percentage(&self) -> Option<Decimal> {
        let target = self.target_value?;
        if target.is_zero() {
            return None;
        }
        let variance = self.variance()?;
        Some(variance / target * Decimal::ONE_HUNDRED)
    }

    /// Actual over target as a percentage, capped at 100. `None` when the
    /// target is unset or zero; zero when only the actual is unset.
    pub fn progress_percentage(&self) -> Option<Decimal> {
        let target = self.target_value?;
        if target.is_zero() {
            return None;
        }
        let Some(actual) = self.actual_value else {
            return Some(Decimal::ZERO);
        };
        let pct = actual / target * Decimal::ONE_HUNDRED;
        Some(pct.min(Decimal::ONE_HUNDRED))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinancialMetric {
    pub metric_type: MetricType,
    pub period_type: PeriodType,
    pub period_start: NaiveDate,
    pub target_value: Option<Decimal>,
    pub actual_value: Option<Decimal>,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    #[default]
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    Won,
    Lost,
    Cancelled,
}

impl OpportunityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityStatus::Prospecting => "prospecting",
            OpportunityStatus::Qualification => "qualification",
            OpportunityStatus::Proposal => "proposal",
            OpportunityStatus::Negotiation => "negotiation",
            OpportunityStatus::Won => "won",
            OpportunityStatus::Lost => "lost",
            OpportunityStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "qualification" => OpportunityStatus::Qualification,
            "proposal" => OpportunityStatus::Proposal,
            "negotiation" => OpportunityStatus::Negotiation,
            "won" => OpportunityStatus::Won,
            "lost" => OpportunityStatus::Lost,
            "cancelled" => OpportunityStatus::Cancelled,
            _ => OpportunityStatus::Prospecting,
        }
    }

    /// Closed statuses leave the active pipeline.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            OpportunityStatus::Won | OpportunityStatus::Lost | OpportunityStatus::Cancelled
        )
    }
}

/// A tracked bid or engagement in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub client_name: String,
    pub agency: String,
    pub status: OpportunityStatus,
    pub priority: Priority,
    pub estimated_value: Option<Decimal>,
    /// Whole percentage, 0 to 100.
    pub win_probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub proposal_submitted_date: Option<NaiveDate>,
    pub award_date: Option<NaiveDate>,
    pub actual_value: Option<Decimal>,
    pub notes: String,
    pub assignee: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Opportunity {
    pub fn is_active(&self) -> bool {
        !self.status.is_closed()
    }

    /// Estimated value discounted by the win probability; `None` when no
    /// estimate is set.
    pub fn weighted_value(&self) -> Option<Decimal> {
        let estimated = self.estimated_value?;
        Some(estimated * Decimal::from(self.win_probability) / Decimal::ONE_HUNDRED)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    pub client_name: String,
    pub agency: String,
    pub status: OpportunityStatus,
    pub priority: Priority,
    pub estimated_value: Option<Decimal>,
    pub win_probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub proposal_submitted_date: Option<NaiveDate>,
    pub award_date: Option<NaiveDate>,
    pub actual_value: Option<Decimal>,
    pub notes: String,
    pub assignee: Option<String>,
}

impl NewOpportunity {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if !(0..=100).contains(&self.win_probability) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "win_probability must be between 0 and 100".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    #[default]
    NotStarted,
    ApplicationPrep,
    ApplicationSubmitted,
    UnderReview,
    Approved,
    Denied,
    Active,
    Expired,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::NotStarted => "not_started",
            TrackingStatus::ApplicationPrep => "application_prep",
            TrackingStatus::ApplicationSubmitted => "application_submitted",
            TrackingStatus::UnderReview => "under_review",
            TrackingStatus::Approved => "approved",
            TrackingStatus::Denied => "denied",
            TrackingStatus::Active => "active",
            TrackingStatus::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "application_prep" => TrackingStatus::ApplicationPrep,
            "application_submitted" => TrackingStatus::ApplicationSubmitted,
            "under_review" => TrackingStatus::UnderReview,
            "approved" => TrackingStatus::Approved,
            "denied" => TrackingStatus::Denied,
            "active" => TrackingStatus::Active,
            "expired" => TrackingStatus::Expired,
            _ => TrackingStatus::NotStarted,
        }
    }
}

/// Progress of a certification application (8(a), HUBZone, SAM and the
/// like), optionally linked to a published certification record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificationTracking {
    pub id: String,
    pub certification_id: Option<String>,
    pub name: String,
    pub status: TrackingStatus,
    pub priority: Priority,
    pub target_submission_date: Option<NaiveDate>,
    pub submission_date: Option<NaiveDate>,
    pub expected_approval_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub notes: String,
    pub assignee: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CertificationTracking {
    /// Whether the target submission date has slipped.
    ///
    /// The exempt list carries the label "submitted", which no status
    /// produces ("application_submitted" is the real label), so a submitted
    /// application past its target date still reads as overdue. Kept as-is
    /// until the label set is reconciled.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if ["submitted", "under_review", "approved", "active"].contains(&self.status.as_str()) {
            return false;
        }
        match self.target_submission_date {
            Some(target) => today > target,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificationTracking {
    pub certification_id: Option<String>,
    pub name: String,
    pub status: TrackingStatus,
    pub priority: Priority,
    pub target_submission_date: Option<NaiveDate>,
    pub submission_date: Option<NaiveDate>,
    pub expected_approval_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub notes: String,
    pub assignee: Option<String>,
}

impl NewCertificationTracking {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        Ok(())
    }
}

/// Optional milestone list filters; equality matches, ANDed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneFilters {
    pub period_id: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub assignee: Option<String>,
}

/// Pipeline list filters. With no status the list is restricted to active
/// opportunities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityFilters {
    pub status: Option<OpportunityStatus>,
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub overdue: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub not_started: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub total: i64,
    pub active: i64,
    pub won: i64,
    pub lost: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStats {
    pub total: i64,
    pub active: i64,
    pub approved: i64,
    pub pending: i64,
}

/// Pipeline rows grouped by status, with counts and raw value sums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityStatusGroup {
    pub status: OpportunityStatus,
    pub count: i64,
    pub total_value: Decimal,
}

/// Milestone detail payload with its tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDetail {
    pub milestone: Milestone,
    pub tasks: Vec<PlanTask>,
    pub progress_percentage: i64,
    pub is_overdue: bool,
}

/// A period with its milestones, for the grouped milestone board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodOverview {
    pub period: MilestonePeriod,
    pub milestones: Vec<Milestone>,
    pub progress_percentage: i64,
}

/// Revenue and expense rows for one year, with year-to-date sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    pub year: i32,
    pub revenue: Vec<FinancialMetric>,
    pub expenses: Vec<FinancialMetric>,
    pub ytd_revenue: Decimal,
    pub ytd_target: Decimal,
}

/// Pipeline board payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOverview {
    pub stats: PipelineStats,
    pub total_value: Decimal,
    pub weighted_value: Decimal,
    pub by_status: Vec<OpportunityStatusGroup>,
    pub opportunities: Vec<Opportunity>,
}

/// Certification board payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingOverview {
    pub stats: TrackingStats,
    pub items: Vec<CertificationTracking>,
}

/// Top-level dashboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDashboard {
    pub milestone_stats: MilestoneStats,
    pub task_stats: TaskStats,
    pub pipeline_stats: PipelineStats,
    pub ytd_revenue: Decimal,
    pub ytd_target: Decimal,
    pub total_pipeline_value: Decimal,
    pub weighted_pipeline_value: Decimal,
    pub recent_milestones: Vec<Milestone>,
    pub upcoming_opportunities: Vec<Opportunity>,
}
