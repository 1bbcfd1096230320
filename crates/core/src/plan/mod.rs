//! Plan module - the internal business-plan tracker.

mod plan_model;
#[cfg(test)]
mod plan_model_tests;
mod plan_service;
#[cfg(test)]
mod plan_service_tests;
mod plan_traits;

pub use plan_model::{
    CertificationTracking, FinancialMetric, FinancialOverview, MetricType, Milestone,
    MilestoneDetail, MilestoneFilters, MilestonePeriod, MilestoneStats, MilestoneStatus,
    NewCertificationTracking, NewFinancialMetric, NewMilestone, NewMilestonePeriod,
    NewOpportunity, NewPlanTask, Opportunity, OpportunityFilters, OpportunityStatus,
    OpportunityStatusGroup, PeriodOverview, PeriodType, PipelineOverview, PipelineStats,
    PlanDashboard, PlanTask, Priority, TaskStats, TaskStatus, TrackingOverview, TrackingStats,
    TrackingStatus,
};
pub use plan_service::PlanService;
pub use plan_traits::{PlanRepositoryTrait, PlanServiceTrait};
