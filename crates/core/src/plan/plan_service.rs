//! Business-plan service: dashboard aggregation and tracker operations.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::constants::{RECENT_MILESTONES_LIMIT, UPCOMING_OPPORTUNITIES_LIMIT};
use crate::errors::Result;

use super::plan_model::{
    CertificationTracking, FinancialMetric, FinancialOverview, Milestone, MilestoneDetail,
    MilestoneFilters, MilestonePeriod, MilestoneStats, MilestoneStatus, NewCertificationTracking,
    NewFinancialMetric, NewMilestone, NewMilestonePeriod, NewOpportunity, NewPlanTask,
    Opportunity, OpportunityFilters, OpportunityStatus, OpportunityStatusGroup, PeriodOverview,
    PipelineOverview, PipelineStats, PlanDashboard, PlanTask, TaskStats, TaskStatus, TrackingOverview,
    TrackingStats, TrackingStatus,
};
use super::plan_traits::{PlanRepositoryTrait, PlanServiceTrait};

pub struct PlanService {
    repository: Arc<dyn PlanRepositoryTrait>,
}

impl PlanService {
    pub fn new(repository: Arc<dyn PlanRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn milestone_stats(milestones: &[Milestone], today: NaiveDate) -> MilestoneStats {
        MilestoneStats {
            total: milestones.len() as i64,
            completed: milestones
                .iter()
                .filter(|m| m.status == MilestoneStatus::Completed)
                .count() as i64,
            in_progress: milestones
                .iter()
                .filter(|m| m.status == MilestoneStatus::InProgress)
                .count() as i64,
            overdue: milestones.iter().filter(|m| m.is_overdue(today)).count() as i64,
        }
    }

    fn task_stats(tasks: &[PlanTask]) -> TaskStats {
        TaskStats {
            total: tasks.len() as i64,
            completed: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count() as i64,
            in_progress: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count() as i64,
            not_started: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::NotStarted)
                .count() as i64,
        }
    }

    fn pipeline_stats(opportunities: &[Opportunity]) -> PipelineStats {
        PipelineStats {
            total: opportunities.len() as i64,
            active: opportunities.iter().filter(|o| o.is_active()).count() as i64,
            won: opportunities
                .iter()
                .filter(|o| o.status == OpportunityStatus::Won)
                .count() as i64,
            lost: opportunities
                .iter()
                .filter(|o| o.status == OpportunityStatus::Lost)
                .count() as i64,
        }
    }

    /// Raw and probability-weighted sums over active opportunities. Rows
    /// without an estimate contribute nothing.
    fn pipeline_values(opportunities: &[Opportunity]) -> (Decimal, Decimal) {
        let mut total = Decimal::ZERO;
        let mut weighted = Decimal::ZERO;
        for opportunity in opportunities.iter().filter(|o| o.is_active()) {
            if let Some(value) = opportunity.estimated_value {
                total += value;
            }
            if let Some(value) = opportunity.weighted_value() {
                weighted += value;
            }
        }
        (total, weighted)
    }

    /// Year-to-date sums over metric rows through the current month. The
    /// cutoff is month granularity, so a row dated later in the current
    /// month still counts.
    pub(crate) fn ytd_sums(metrics: &[FinancialMetric], today: NaiveDate) -> (Decimal, Decimal) {
        let mut actual = Decimal::ZERO;
        let mut target = Decimal::ZERO;
        let cutoff = (today.year(), today.month());
        for metric in metrics
            .iter()
            .filter(|m| (m.period_start.year(), m.period_start.month()) <= cutoff)
        {
            if let Some(value) = metric.actual_value {
                actual += value;
            }
            if let Some(value) = metric.target_value {
                target += value;
            }
        }
        (actual, target)
    }

    fn tracking_stats(items: &[CertificationTracking]) -> TrackingStats {
        TrackingStats {
            total: items.len() as i64,
            active: items
                .iter()
                .filter(|c| c.status == TrackingStatus::Active)
                .count() as i64,
            approved: items
                .iter()
                .filter(|c| c.status == TrackingStatus::Approved)
                .count() as i64,
            pending: items
                .iter()
                .filter(|c| {
                    matches!(
                        c.status,
                        TrackingStatus::NotStarted
                            | TrackingStatus::ApplicationPrep
                            | TrackingStatus::ApplicationSubmitted
                            | TrackingStatus::UnderReview
                    )
                })
                .count() as i64,
        }
    }

    fn period_overview(&self, period: MilestonePeriod) -> Result<PeriodOverview> {
        let filters = MilestoneFilters {
            period_id: Some(period.id.clone()),
            ..Default::default()
        };
        let milestones = self.repository.list_milestones(&filters)?;
        let progress_percentage = period.progress_percentage(&milestones);
        Ok(PeriodOverview {
            period,
            milestones,
            progress_percentage,
        })
    }
}

#[async_trait::async_trait]
impl PlanServiceTrait for PlanService {
    fn dashboard(&self) -> Result<PlanDashboard> {
        let today = Self::today();
        let milestones = self.repository.list_milestones(&MilestoneFilters::default())?;
        let tasks = self.repository.list_all_tasks()?;
        let opportunities = self
            .repository
            .list_opportunities(&OpportunityFilters::default(), false)?;
        let revenue = self.repository.list_metrics("revenue", today.year())?;

        let (total_pipeline_value, weighted_pipeline_value) =
            Self::pipeline_values(&opportunities);
        let (ytd_revenue, ytd_target) = Self::ytd_sums(&revenue, today);

        let mut recent_milestones = milestones.clone();
        recent_milestones.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        recent_milestones.truncate(RECENT_MILESTONES_LIMIT as usize);

        let mut upcoming_opportunities: Vec<Opportunity> = opportunities
            .iter()
            .filter(|o| o.is_active() && o.expected_close_date.is_some_and(|close| close >= today))
            .cloned()
            .collect();
        upcoming_opportunities.sort_by_key(|o| o.expected_close_date);
        upcoming_opportunities.truncate(UPCOMING_OPPORTUNITIES_LIMIT as usize);

        Ok(PlanDashboard {
            milestone_stats: Self::milestone_stats(&milestones, today),
            task_stats: Self::task_stats(&tasks),
            pipeline_stats: Self::pipeline_stats(&opportunities),
            ytd_revenue,
            ytd_target,
            total_pipeline_value,
            weighted_pipeline_value,
            recent_milestones,
            upcoming_opportunities,
        })
    }

    fn period_overviews(&self) -> Result<Vec<PeriodOverview>> {
        self.repository
            .list_periods()?
            .into_iter()
            .map(|period| self.period_overview(period))
            .collect()
    }

    fn list_milestones(&self, filters: MilestoneFilters) -> Result<Vec<Milestone>> {
        self.repository.list_milestones(&filters)
    }

    fn get_milestone(&self, id: &str) -> Result<MilestoneDetail> {
        let milestone = self.repository.get_milestone(id)?;
        let tasks = self.repository.list_tasks(&milestone.id)?;
        let completed = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count() as i64;
        let progress_percentage = milestone.progress_percentage(completed, tasks.len() as i64);
        let is_overdue = milestone.is_overdue(Self::today());
        Ok(MilestoneDetail {
            milestone,
            tasks,
            progress_percentage,
            is_overdue,
        })
    }

    fn financial_overview(&self, year: Option<i32>) -> Result<FinancialOverview> {
        let today = Self::today();
        let year = year.unwrap_or_else(|| today.year());
        let revenue = self.repository.list_metrics("revenue", year)?;
        let expenses = self.repository.list_metrics("expense", year)?;
        let (ytd_revenue, ytd_target) = Self::ytd_sums(&revenue, today);
        Ok(FinancialOverview {
            year,
            revenue,
            expenses,
            ytd_revenue,
            ytd_target,
        })
    }

    fn pipeline(&self, filters: OpportunityFilters) -> Result<PipelineOverview> {
        let all = self
            .repository
            .list_opportunities(&OpportunityFilters::default(), false)?;
        let stats = Self::pipeline_stats(&all);
        let (total_value, weighted_value) = Self::pipeline_values(&all);

        let by_status = [
            OpportunityStatus::Prospecting,
            OpportunityStatus::Qualification,
            OpportunityStatus::Proposal,
            OpportunityStatus::Negotiation,
            OpportunityStatus::Won,
            OpportunityStatus::Lost,
            OpportunityStatus::Cancelled,
        ]
        .into_iter()
        .filter_map(|status| {
            let group: Vec<&Opportunity> = all.iter().filter(|o| o.status == status).collect();
            if group.is_empty() {
                return None;
            }
            let total_value = group.iter().filter_map(|o| o.estimated_value).sum();
            Some(OpportunityStatusGroup {
                status,
                count: group.len() as i64,
                total_value,
            })
        })
        .collect();

        let active_only = filters.status.is_none();
        let opportunities = self.repository.list_opportunities(&filters, active_only)?;

        Ok(PipelineOverview {
            stats,
            total_value,
            weighted_value,
            by_status,
            opportunities,
        })
    }

    fn certifications(&self, status: Option<TrackingStatus>) -> Result<TrackingOverview> {
        let all = self.repository.list_tracking(None)?;
        let stats = Self::tracking_stats(&all);
        let items = match status {
            Some(status) => self.repository.list_tracking(Some(status.as_str()))?,
            None => all,
        };
        Ok(TrackingOverview { stats, items })
    }

    async fn create_period(&self, period: NewMilestonePeriod) -> Result<MilestonePeriod> {
        self.repository.create_period(period).await
    }

    async fn create_milestone(&self, milestone: NewMilestone) -> Result<Milestone> {
        milestone.validate()?;
        self.repository.create_milestone(milestone).await
    }

    async fn update_milestone(&self, id: &str, milestone: NewMilestone) -> Result<Milestone> {
        milestone.validate()?;
        self.repository.update_milestone(id, milestone).await
    }

    async fn delete_milestone(&self, id: &str) -> Result<()> {
        self.repository.delete_milestone(id).await?;
        Ok(())
    }

    async fn create_task(&self, task: NewPlanTask) -> Result<PlanTask> {
        task.validate()?;
        self.repository.create_task(task).await
    }

    async fn update_task(&self, id: &str, task: NewPlanTask) -> Result<PlanTask> {
        task.validate()?;
        self.repository.update_task(id, task).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.repository.delete_task(id).await?;
        Ok(())
    }

    async fn create_metric(&self, metric: NewFinancialMetric) -> Result<FinancialMetric> {
        self.repository.create_metric(metric).await
    }

    async fn update_metric(
        &self,
        id: &str,
        metric: NewFinancialMetric,
    ) -> Result<FinancialMetric> {
        self.repository.update_metric(id, metric).await
    }

    async fn delete_metric(&self, id: &str) -> Result<()> {
        self.repository.delete_metric(id).await?;
        Ok(())
    }

    async fn create_opportunity(&self, opportunity: NewOpportunity) -> Result<Opportunity> {
        opportunity.validate()?;
        self.repository.create_opportunity(opportunity).await
    }

    async fn update_opportunity(
        &self,
        id: &str,
        opportunity: NewOpportunity,
    ) -> Result<Opportunity> {
        opportunity.validate()?;
        self.repository.update_opportunity(id, opportunity).await
    }

    async fn delete_opportunity(&self, id: &str) -> Result<()> {
        self.repository.delete_opportunity(id).await?;
        Ok(())
    }

    async fn create_tracking(
        &self,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking> {
        tracking.validate()?;
        self.repository.create_tracking(tracking).await
    }

    async fn update_tracking(
        &self,
        id: &str,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking> {
        tracking.validate()?;
        self.repository.update_tracking(id, tracking).await
    }

    async fn delete_tracking(&self, id: &str) -> Result<()> {
        self.repository.delete_tracking(id).await?;
        Ok(())
    }
}
