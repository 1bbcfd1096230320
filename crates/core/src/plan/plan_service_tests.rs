//! Tests for the plan service aggregates against a mock repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal_macros::dec;

use crate::errors::{Error, Result};
use crate::plan::{
    CertificationTracking, FinancialMetric, MetricType, Milestone, MilestoneFilters,
    MilestonePeriod, MilestoneStatus, NewCertificationTracking, NewFinancialMetric, NewMilestone,
    NewMilestonePeriod, NewOpportunity, NewPlanTask, Opportunity, OpportunityFilters,
    OpportunityStatus, PeriodType, PlanRepositoryTrait, PlanService, PlanServiceTrait, PlanTask,
    Priority, TaskStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn opportunity(id: &str, status: OpportunityStatus) -> Opportunity {
    let now = Utc::now().naive_utc();
    Opportunity {
        id: id.to_string(),
        title: format!("Opportunity {}", id),
        description: String::new(),
        client_name: String::new(),
        agency: String::new(),
        status,
        priority: Priority::Medium,
        estimated_value: None,
        win_probability: 50,
        expected_close_date: None,
        proposal_submitted_date: None,
        award_date: None,
        actual_value: None,
        notes: String::new(),
        assignee: None,
        created_at: now,
        updated_at: now,
    }
}

fn task(id: &str, status: TaskStatus) -> PlanTask {
    let now = Utc::now().naive_utc();
    PlanTask {
        id: id.to_string(),
        milestone_id: "m-1".to_string(),
        title: format!("Task {}", id),
        description: String::new(),
        status,
        due_date: None,
        completed_date: None,
        assignee: None,
        display_order: 0,
        created_at: now,
        updated_at: now,
    }
}

fn milestone(id: &str, status: MilestoneStatus, target: NaiveDate) -> Milestone {
    let now = Utc::now().naive_utc();
    Milestone {
        id: id.to_string(),
        period_id: "p-1".to_string(),
        title: format!("Milestone {}", id),
        description: String::new(),
        status,
        priority: Priority::Medium,
        target_date: target,
        completed_date: None,
        assignee: None,
        notes: String::new(),
        display_order: 0,
        created_at: now,
        updated_at: now,
    }
}

fn metric(month: u32, target: &str, actual: &str) -> FinancialMetric {
    let now = Utc::now().naive_utc();
    FinancialMetric {
        id: format!("f-{}", month),
        metric_type: MetricType::Revenue,
        period_type: PeriodType::Monthly,
        period_start: date(Utc::now().year(), month, 1),
        target_value: target.parse().ok(),
        actual_value: actual.parse().ok(),
        notes: String::new(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
struct MockPlanRepository {
    milestones: Vec<Milestone>,
    tasks: Vec<PlanTask>,
    metrics: Vec<FinancialMetric>,
    opportunities: Vec<Opportunity>,
}

#[async_trait]
impl PlanRepositoryTrait for MockPlanRepository {
    fn list_periods(&self) -> Result<Vec<MilestonePeriod>> {
        Ok(Vec::new())
    }

    fn list_milestones(&self, filters: &MilestoneFilters) -> Result<Vec<Milestone>> {
        Ok(self
            .milestones
            .iter()
            .filter(|m| {
                filters
                    .period_id
                    .as_ref()
                    .map_or(true, |p| *p == m.period_id)
            })
            .cloned()
            .collect())
    }

    fn get_milestone(&self, id: &str) -> Result<Milestone> {
        self.milestones
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Milestone".to_string()))
    }

    fn list_tasks(&self, milestone_id: &str) -> Result<Vec<PlanTask>> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.milestone_id == milestone_id)
            .cloned()
            .collect())
    }

    fn list_all_tasks(&self) -> Result<Vec<PlanTask>> {
        Ok(self.tasks.clone())
    }

    fn list_metrics(&self, metric_type: &str, year: i32) -> Result<Vec<FinancialMetric>> {
        Ok(self
            .metrics
            .iter()
            .filter(|m| m.metric_type.as_str() == metric_type && m.period_start.year() == year)
            .cloned()
            .collect())
    }

    fn list_opportunities(
        &self,
        filters: &OpportunityFilters,
        active_only: bool,
    ) -> Result<Vec<Opportunity>> {
        Ok(self
            .opportunities
            .iter()
            .filter(|o| !active_only || o.is_active())
            .filter(|o| filters.status.map_or(true, |s| s == o.status))
            .cloned()
            .collect())
    }

    fn list_tracking(&self, _status: Option<&str>) -> Result<Vec<CertificationTracking>> {
        Ok(Vec::new())
    }

    async fn create_period(&self, _p: NewMilestonePeriod) -> Result<MilestonePeriod> {
        unimplemented!()
    }
    async fn create_milestone(&self, _m: NewMilestone) -> Result<Milestone> {
        unimplemented!()
    }
    async fn update_milestone(&self, _id: &str, _m: NewMilestone) -> Result<Milestone> {
        unimplemented!()
    }
    async fn delete_milestone(&self, _id: &str) -> Result<usize> {
        unimplemented!()
    }
    async fn create_task(&self, _t: NewPlanTask) -> Result<PlanTask> {
        unimplemented!()
    }
    async fn update_task(&self, _id: &str, _t: NewPlanTask) -> Result<PlanTask> {
        unimplemented!()
    }
    async fn delete_task(&self, _id: &str) -> Result<usize> {
        unimplemented!()
    }
    async fn create_metric(&self, _m: NewFinancialMetric) -> Result<FinancialMetric> {
        unimplemented!()
    }
    async fn update_metric(&self, _id: &str, _m: NewFinancialMetric) -> Result<FinancialMetric> {
        unimplemented!()
    }
    async fn delete_metric(&self, _id: &str) -> Result<usize> {
        unimplemented!()
    }
    async fn create_opportunity(&self, _o: NewOpportunity) -> Result<Opportunity> {
        unimplemented!()
    }
    async fn update_opportunity(&self, _id: &str, _o: NewOpportunity) -> Result<Opportunity> {
        unimplemented!()
    }
    async fn delete_opportunity(&self, _id: &str) -> Result<usize> {
        unimplemented!()
    }
    async fn create_tracking(
        &self,
        _c: NewCertificationTracking,
    ) -> Result<CertificationTracking> {
        unimplemented!()
    }
    async fn update_tracking(
        &self,
        _id: &str,
        _c: NewCertificationTracking,
    ) -> Result<CertificationTracking> {
        unimplemented!()
    }
    async fn delete_tracking(&self, _id: &str) -> Result<usize> {
        unimplemented!()
    }
}

#[test]
fn test_dashboard_counters_and_sums() {
    let today = Utc::now().date_naive();
    let past = today.pred_opt().unwrap();
    let future = today.succ_opt().unwrap();

    let mut won = opportunity("won", OpportunityStatus::Won);
    won.estimated_value = Some(dec!(900000));
    let mut active_a = opportunity("a", OpportunityStatus::Proposal);
    active_a.estimated_value = Some(dec!(100000));
    active_a.win_probability = 40;
    let mut active_b = opportunity("b", OpportunityStatus::Prospecting);
    active_b.estimated_value = Some(dec!(50000));
    active_b.win_probability = 10;
    let no_estimate = opportunity("c", OpportunityStatus::Negotiation);

    let repo = MockPlanRepository {
        milestones: vec![
            milestone("m-1", MilestoneStatus::Completed, past),
            milestone("m-2", MilestoneStatus::InProgress, past),
            milestone("m-3", MilestoneStatus::NotStarted, future),
        ],
        tasks: vec![
            task("t-1", TaskStatus::Completed),
            task("t-2", TaskStatus::InProgress),
            task("t-3", TaskStatus::NotStarted),
            task("t-4", TaskStatus::Cancelled),
        ],
        metrics: vec![metric(1, "10000", "12000"), metric(2, "10000", "")],
        opportunities: vec![won, active_a, active_b, no_estimate],
    };
    let service = PlanService::new(Arc::new(repo));

    let dashboard = service.dashboard().unwrap();

    assert_eq!(dashboard.milestone_stats.total, 3);
    assert_eq!(dashboard.milestone_stats.completed, 1);
    assert_eq!(dashboard.milestone_stats.in_progress, 1);
    assert_eq!(dashboard.milestone_stats.overdue, 1);

    assert_eq!(dashboard.task_stats.total, 4);
    assert_eq!(dashboard.task_stats.completed, 1);
    assert_eq!(dashboard.task_stats.in_progress, 1);
    assert_eq!(dashboard.task_stats.not_started, 1);

    assert_eq!(dashboard.pipeline_stats.total, 4);
    assert_eq!(dashboard.pipeline_stats.active, 3);
    assert_eq!(dashboard.pipeline_stats.won, 1);
    assert_eq!(dashboard.pipeline_stats.lost, 0);

    // Sums span active opportunities only; the won row is excluded and the
    // row without an estimate contributes nothing.
    assert_eq!(dashboard.total_pipeline_value, dec!(150000));
    assert_eq!(dashboard.weighted_pipeline_value, dec!(45000));
}

#[test]
fn test_upcoming_opportunities_drop_past_close_dates() {
    let today = Utc::now().date_naive();
    let past = today.pred_opt().unwrap();
    let future = today.succ_opt().unwrap();

    let mut stale = opportunity("stale", OpportunityStatus::Proposal);
    stale.expected_close_date = Some(past);
    let mut closing_today = opportunity("today", OpportunityStatus::Proposal);
    closing_today.expected_close_date = Some(today);
    let mut ahead = opportunity("ahead", OpportunityStatus::Prospecting);
    ahead.expected_close_date = Some(future);
    let undated = opportunity("undated", OpportunityStatus::Negotiation);

    let repo = MockPlanRepository {
        opportunities: vec![stale, ahead, closing_today, undated],
        ..Default::default()
    };
    let service = PlanService::new(Arc::new(repo));

    let dashboard = service.dashboard().unwrap();
    let ids: Vec<&str> = dashboard
        .upcoming_opportunities
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(ids, ["today", "ahead"]);
}

#[test]
fn test_ytd_sums_cut_off_at_current_month() {
    // The cutoff is month granularity. A row later in the current month
    // still counts; a row in the next month does not.
    let today = date(2025, 6, 15);
    let mut past = metric(1, "10000", "12000");
    past.period_start = date(2025, 1, 1);
    let mut same_month_later_day = metric(6, "5000", "4000");
    same_month_later_day.period_start = date(2025, 6, 30);
    let mut next_month = metric(7, "8000", "9000");
    next_month.period_start = date(2025, 7, 1);

    let (actual, target) =
        PlanService::ytd_sums(&[past, same_month_later_day, next_month], today);
    assert_eq!(actual, dec!(16000));
    assert_eq!(target, dec!(15000));
}

#[test]
fn test_financial_overview_counts_rest_of_current_month() {
    let today = Utc::now().date_naive();
    // Last day of the current month, never earlier than today.
    let month_end = date(
        today.year() + i32::from(today.month() == 12),
        today.month() % 12 + 1,
        1,
    )
    .pred_opt()
    .unwrap();

    let mut late = metric(1, "5000", "4000");
    late.id = "f-late".to_string();
    late.period_start = month_end;

    let repo = MockPlanRepository {
        metrics: vec![metric(1, "10000", "12000"), late],
        ..Default::default()
    };
    let service = PlanService::new(Arc::new(repo));

    let overview = service.financial_overview(Some(today.year())).unwrap();
    assert_eq!(overview.ytd_revenue, dec!(16000));
    assert_eq!(overview.ytd_target, dec!(15000));
    assert_eq!(overview.revenue.len(), 2);
}

#[test]
fn test_pipeline_defaults_to_active_and_groups_by_status() {
    let mut won = opportunity("won", OpportunityStatus::Won);
    won.estimated_value = Some(dec!(200000));
    let mut open_a = opportunity("a", OpportunityStatus::Proposal);
    open_a.estimated_value = Some(dec!(80000));
    let open_b = opportunity("b", OpportunityStatus::Proposal);

    let repo = MockPlanRepository {
        opportunities: vec![won, open_a, open_b],
        ..Default::default()
    };
    let service = PlanService::new(Arc::new(repo));

    let board = service.pipeline(OpportunityFilters::default()).unwrap();
    assert_eq!(board.opportunities.len(), 2);
    assert!(board.opportunities.iter().all(|o| o.is_active()));

    let proposal = board
        .by_status
        .iter()
        .find(|g| g.status == OpportunityStatus::Proposal)
        .unwrap();
    assert_eq!(proposal.count, 2);
    assert_eq!(proposal.total_value, dec!(80000));
    let won_group = board
        .by_status
        .iter()
        .find(|g| g.status == OpportunityStatus::Won)
        .unwrap();
    assert_eq!(won_group.count, 1);
}

#[test]
fn test_milestone_detail_progress_from_tasks() {
    let today = Utc::now().date_naive();
    let repo = MockPlanRepository {
        milestones: vec![milestone("m-1", MilestoneStatus::InProgress, today)],
        tasks: vec![
            task("t-1", TaskStatus::Completed),
            task("t-2", TaskStatus::Completed),
            task("t-3", TaskStatus::InProgress),
        ],
        ..Default::default()
    };
    let service = PlanService::new(Arc::new(repo));

    let detail = service.get_milestone("m-1").unwrap();
    assert_eq!(detail.progress_percentage, 66);
    assert!(!detail.is_overdue);
    assert_eq!(detail.tasks.len(), 3);
}
