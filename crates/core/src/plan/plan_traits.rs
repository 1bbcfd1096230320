//! Business-plan repository and service traits.

use async_trait::async_trait;

use super::plan_model::{
    CertificationTracking, FinancialMetric, FinancialOverview, Milestone, MilestoneDetail,
    MilestoneFilters, MilestonePeriod, NewCertificationTracking, NewFinancialMetric, NewMilestone,
    NewMilestonePeriod, NewOpportunity, NewPlanTask, Opportunity, OpportunityFilters,
    PeriodOverview, PipelineOverview, PlanDashboard, PlanTask, TrackingOverview, TrackingStatus,
};
use crate::errors::Result;

/// Persistence contract for the business-plan tracker.
#[async_trait]
pub trait PlanRepositoryTrait: Send + Sync {
    /// Periods ordered by display_order.
    fn list_periods(&self) -> Result<Vec<MilestonePeriod>>;

    /// Milestones matching the filters, ordered by
    /// (display_order, target_date).
    fn list_milestones(&self, filters: &MilestoneFilters) -> Result<Vec<Milestone>>;

    fn get_milestone(&self, id: &str) -> Result<Milestone>;

    /// Tasks for one milestone, ordered by display_order.
    fn list_tasks(&self, milestone_id: &str) -> Result<Vec<PlanTask>>;

    /// Every task in the plan, for the dashboard counters.
    fn list_all_tasks(&self) -> Result<Vec<PlanTask>>;

    /// Metrics of one type for a calendar year, ordered by period_start.
    fn list_metrics(&self, metric_type: &str, year: i32) -> Result<Vec<FinancialMetric>>;

    /// Opportunities ordered by (-priority, -expected_close_date). When
    /// `active_only` is set, closed statuses are excluded.
    fn list_opportunities(
        &self,
        filters: &OpportunityFilters,
        active_only: bool,
    ) -> Result<Vec<Opportunity>>;

    /// Tracking rows, newest priority first then status and name.
    fn list_tracking(&self, status: Option<&str>) -> Result<Vec<CertificationTracking>>;

    async fn create_period(&self, period: NewMilestonePeriod) -> Result<MilestonePeriod>;
    async fn create_milestone(&self, milestone: NewMilestone) -> Result<Milestone>;
    async fn update_milestone(&self, id: &str, milestone: NewMilestone) -> Result<Milestone>;
    async fn delete_milestone(&self, id: &str) -> Result<usize>;
    async fn create_task(&self, task: NewPlanTask) -> Result<PlanTask>;
    async fn update_task(&self, id: &str, task: NewPlanTask) -> Result<PlanTask>;
    async fn delete_task(&self, id: &str) -> Result<usize>;
    async fn create_metric(&self, metric: NewFinancialMetric) -> Result<FinancialMetric>;
    async fn update_metric(&self, id: &str, metric: NewFinancialMetric)
        -> Result<FinancialMetric>;
    async fn delete_metric(&self, id: &str) -> Result<usize>;
    async fn create_opportunity(&self, opportunity: NewOpportunity) -> Result<Opportunity>;
    async fn update_opportunity(
        &self,
        id: &str,
        opportunity: NewOpportunity,
    ) -> Result<Opportunity>;
    async fn delete_opportunity(&self, id: &str) -> Result<usize>;
    async fn create_tracking(
        &self,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking>;
    async fn update_tracking(
        &self,
        id: &str,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking>;
    async fn delete_tracking(&self, id: &str) -> Result<usize>;
}

/// Business operations over the plan tracker.
#[async_trait]
pub trait PlanServiceTrait: Send + Sync {
    /// Counters, year-to-date figures and shortlists for the dashboard.
    fn dashboard(&self) -> Result<PlanDashboard>;

    /// Periods with their milestones and computed progress.
    fn period_overviews(&self) -> Result<Vec<PeriodOverview>>;

    fn list_milestones(&self, filters: MilestoneFilters) -> Result<Vec<Milestone>>;

    /// Milestone with its tasks and task-derived progress.
    fn get_milestone(&self, id: &str) -> Result<MilestoneDetail>;

    /// Revenue and expense rows for a year (current year by default) with
    /// year-to-date sums over rows whose period has started.
    fn financial_overview(&self, year: Option<i32>) -> Result<FinancialOverview>;

    /// Pipeline board: stats over all opportunities, value sums over active
    /// ones, status grouping and the filtered list.
    fn pipeline(&self, filters: OpportunityFilters) -> Result<PipelineOverview>;

    /// Certification board with counters.
    fn certifications(&self, status: Option<TrackingStatus>) -> Result<TrackingOverview>;

    async fn create_period(&self, period: NewMilestonePeriod) -> Result<MilestonePeriod>;
    async fn create_milestone(&self, milestone: NewMilestone) -> Result<Milestone>;
    async fn update_milestone(&self, id: &str, milestone: NewMilestone) -> Result<Milestone>;
    async fn delete_milestone(&self, id: &str) -> Result<()>;
    async fn create_task(&self, task: NewPlanTask) -> Result<PlanTask>;
    async fn update_task(&self, id: &str, task: NewPlanTask) -> Result<PlanTask>;
    async fn delete_task(&self, id: &str) -> Result<()>;
    async fn create_metric(&self, metric: NewFinancialMetric) -> Result<FinancialMetric>;
    async fn update_metric(&self, id: &str, metric: NewFinancialMetric)
        -> Result<FinancialMetric>;
    async fn delete_metric(&self, id: &str) -> Result<()>;
    async fn create_opportunity(&self, opportunity: NewOpportunity) -> Result<Opportunity>;
    async fn update_opportunity(
        &self,
        id: &str,
        opportunity: NewOpportunity,
    ) -> Result<Opportunity>;
    async fn delete_opportunity(&self, id: &str) -> Result<()>;
    async fn create_tracking(
        &self,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking>;
    async fn update_tracking(
        &self,
        id: &str,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking>;
    async fn delete_tracking(&self, id: &str) -> Result<()>;
}
