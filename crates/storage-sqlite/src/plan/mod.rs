//! SQLite storage implementation for the business-plan tracker.

mod model;
mod repository;

pub use model::{
    CertificationTrackingDB, FinancialMetricDB, MilestoneDB, MilestonePeriodDB,
    NewCertificationTrackingDB, NewFinancialMetricDB, NewMilestoneDB, NewMilestonePeriodDB,
    NewOpportunityDB, NewPlanTaskDB, OpportunityDB, PlanTaskDB,
};
pub use repository::PlanRepository;
