use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::SqliteConnection;
use uuid::Uuid;

use meridian_core::plan::{
    CertificationTracking, FinancialMetric, Milestone, MilestoneFilters, MilestonePeriod,
    NewCertificationTracking, NewFinancialMetric, NewMilestone, NewMilestonePeriod,
    NewOpportunity, NewPlanTask, Opportunity, OpportunityFilters, PlanRepositoryTrait, PlanTask,
};
use meridian_core::Result;

use super::model::{
    CertificationTrackingChangeset, CertificationTrackingDB, FinancialMetricChangeset,
    FinancialMetricDB, MilestoneChangeset, MilestoneDB, MilestonePeriodDB, NewCertificationTrackingDB,
    NewFinancialMetricDB, NewMilestoneDB, NewMilestonePeriodDB, NewOpportunityDB, NewPlanTaskDB,
    OpportunityChangeset, OpportunityDB, PlanTaskChangeset, PlanTaskDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{
    certification_tracking, financial_metrics, milestone_periods, milestones, opportunities,
    plan_tasks,
};

/// Numeric rank for the textual priority column, used for descending sorts.
const PRIORITY_RANK: &str =
    "CASE priority WHEN 'critical' THEN 3 WHEN 'high' THEN 2 WHEN 'medium' THEN 1 ELSE 0 END";

const CLOSED_STATUSES: [&str; 3] = ["won", "lost", "cancelled"];

pub struct PlanRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PlanRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PlanRepository { pool, writer }
    }
}

#[async_trait]
impl PlanRepositoryTrait for PlanRepository {
    fn list_periods(&self) -> Result<Vec<MilestonePeriod>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = milestone_periods::table
            .order(milestone_periods::display_order.asc())
            .load::<MilestonePeriodDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(MilestonePeriod::from).collect())
    }

    fn list_milestones(&self, filters: &MilestoneFilters) -> Result<Vec<Milestone>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = milestones::table.into_boxed();

        if let Some(period_id) = &filters.period_id {
            query = query.filter(milestones::period_id.eq(period_id.clone()));
        }
        if let Some(status) = filters.status {
            query = query.filter(milestones::status.eq(status.as_str()));
        }
        if let Some(assignee) = &filters.assignee {
            query = query.filter(milestones::assignee.eq(assignee.clone()));
        }

        let rows = query
            .order((
                milestones::display_order.asc(),
                milestones::target_date.asc(),
            ))
            .load::<MilestoneDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Milestone::from).collect())
    }

    fn get_milestone(&self, milestone_id: &str) -> Result<Milestone> {
        let mut conn = get_connection(&self.pool)?;
        let row = milestones::table
            .find(milestone_id)
            .first::<MilestoneDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Milestone::from(row))
    }

    fn list_tasks(&self, for_milestone_id: &str) -> Result<Vec<PlanTask>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = plan_tasks::table
            .filter(plan_tasks::milestone_id.eq(for_milestone_id))
            .order(plan_tasks::display_order.asc())
            .load::<PlanTaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(PlanTask::from).collect())
    }

    fn list_all_tasks(&self) -> Result<Vec<PlanTask>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = plan_tasks::table
            .load::<PlanTaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(PlanTask::from).collect())
    }

    fn list_metrics(&self, metric_type: &str, year: i32) -> Result<Vec<FinancialMetric>> {
        let mut conn = get_connection(&self.pool)?;
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
        let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
        let rows = financial_metrics::table
            .filter(financial_metrics::metric_type.eq(metric_type))
            .filter(financial_metrics::period_start.between(year_start, year_end))
            .order(financial_metrics::period_start.asc())
            .load::<FinancialMetricDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(FinancialMetric::from).collect())
    }

    fn list_opportunities(
        &self,
        filters: &OpportunityFilters,
        active_only: bool,
    ) -> Result<Vec<Opportunity>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = opportunities::table.into_boxed();

        if let Some(status) = filters.status {
            query = query.filter(opportunities::status.eq(status.as_str()));
        }
        if let Some(assignee) = &filters.assignee {
            query = query.filter(opportunities::assignee.eq(assignee.clone()));
        }
        if active_only {
            query = query.filter(opportunities::status.ne_all(CLOSED_STATUSES));
        }

        let rows = query
            .order((
                sql::<Integer>(PRIORITY_RANK).desc(),
                opportunities::expected_close_date.desc(),
            ))
            .load::<OpportunityDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Opportunity::from).collect())
    }

    fn list_tracking(&self, status: Option<&str>) -> Result<Vec<CertificationTracking>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = certification_tracking::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(certification_tracking::status.eq(status.to_string()));
        }
        let rows = query
            .order((
                sql::<Integer>(PRIORITY_RANK).desc(),
                certification_tracking::status.asc(),
                certification_tracking::name.asc(),
            ))
            .load::<CertificationTrackingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CertificationTracking::from).collect())
    }

    async fn create_period(&self, period: NewMilestonePeriod) -> Result<MilestonePeriod> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MilestonePeriod> {
                let mut new_db: NewMilestonePeriodDB = period.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(milestone_periods::table)
                    .values(&new_db)
                    .returning(MilestonePeriodDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(MilestonePeriod::from(result_db))
            })
            .await
    }

    async fn create_milestone(&self, milestone: NewMilestone) -> Result<Milestone> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Milestone> {
                let mut new_db: NewMilestoneDB = milestone.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(milestones::table)
                    .values(&new_db)
                    .returning(MilestoneDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Milestone::from(result_db))
            })
            .await
    }

    async fn update_milestone(&self, milestone_id: &str, milestone: NewMilestone) -> Result<Milestone> {
        let milestone_id = milestone_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Milestone> {
                let changes: MilestoneChangeset = milestone.into();
                diesel::update(milestones::table.find(milestone_id.clone()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = milestones::table
                    .find(milestone_id)
                    .first::<MilestoneDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Milestone::from(result_db))
            })
            .await
    }

    async fn delete_milestone(&self, milestone_id: &str) -> Result<usize> {
        let milestone_id = milestone_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(milestones::table.find(milestone_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn create_task(&self, task: NewPlanTask) -> Result<PlanTask> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PlanTask> {
                let mut new_db: NewPlanTaskDB = task.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(plan_tasks::table)
                    .values(&new_db)
                    .returning(PlanTaskDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(PlanTask::from(result_db))
            })
            .await
    }

    async fn update_task(&self, task_id: &str, task: NewPlanTask) -> Result<PlanTask> {
        let task_id = task_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PlanTask> {
                let changes: PlanTaskChangeset = task.into();
                diesel::update(plan_tasks::table.find(task_id.clone()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = plan_tasks::table
                    .find(task_id)
                    .first::<PlanTaskDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(PlanTask::from(result_db))
            })
            .await
    }

    async fn delete_task(&self, task_id: &str) -> Result<usize> {
        let task_id = task_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(plan_tasks::table.find(task_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn create_metric(&self, metric: NewFinancialMetric) -> Result<FinancialMetric> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FinancialMetric> {
                let mut new_db: NewFinancialMetricDB = metric.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(financial_metrics::table)
                    .values(&new_db)
                    .returning(FinancialMetricDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(FinancialMetric::from(result_db))
            })
            .await
    }

    async fn update_metric(
        &self,
        metric_id: &str,
        metric: NewFinancialMetric,
    ) -> Result<FinancialMetric> {
        let metric_id = metric_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FinancialMetric> {
                let changes: FinancialMetricChangeset = metric.into();
                diesel::update(financial_metrics::table.find(metric_id.clone()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = financial_metrics::table
                    .find(metric_id)
                    .first::<FinancialMetricDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(FinancialMetric::from(result_db))
            })
            .await
    }

    async fn delete_metric(&self, metric_id: &str) -> Result<usize> {
        let metric_id = metric_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(financial_metrics::table.find(metric_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn create_opportunity(&self, opportunity: NewOpportunity) -> Result<Opportunity> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Opportunity> {
                let mut new_db: NewOpportunityDB = opportunity.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(opportunities::table)
                    .values(&new_db)
                    .returning(OpportunityDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Opportunity::from(result_db))
            })
            .await
    }

    async fn update_opportunity(
        &self,
        opportunity_id: &str,
        opportunity: NewOpportunity,
    ) -> Result<Opportunity> {
        let opportunity_id = opportunity_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Opportunity> {
                let changes: OpportunityChangeset = opportunity.into();
                diesel::update(opportunities::table.find(opportunity_id.clone()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = opportunities::table
                    .find(opportunity_id)
                    .first::<OpportunityDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Opportunity::from(result_db))
            })
            .await
    }

    async fn delete_opportunity(&self, opportunity_id: &str) -> Result<usize> {
        let opportunity_id = opportunity_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(opportunities::table.find(opportunity_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn create_tracking(
        &self,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<CertificationTracking> {
                    let mut new_db: NewCertificationTrackingDB = tracking.into();
                    new_db.id = Some(Uuid::new_v4().to_string());

                    let result_db = diesel::insert_into(certification_tracking::table)
                        .values(&new_db)
                        .returning(CertificationTrackingDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(CertificationTracking::from(result_db))
                },
            )
            .await
    }

    async fn update_tracking(
        &self,
        tracking_id: &str,
        tracking: NewCertificationTracking,
    ) -> Result<CertificationTracking> {
        let tracking_id = tracking_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<CertificationTracking> {
                    let changes: CertificationTrackingChangeset = tracking.into();
                    diesel::update(certification_tracking::table.find(tracking_id.clone()))
                        .set(&changes)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    let result_db = certification_tracking::table
                        .find(tracking_id)
                        .first::<CertificationTrackingDB>(conn)
                        .map_err(StorageError::from)?;
                    Ok(CertificationTracking::from(result_db))
                },
            )
            .await
    }

    async fn delete_tracking(&self, tracking_id: &str) -> Result<usize> {
        let tracking_id = tracking_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(certification_tracking::table.find(tracking_id))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use meridian_core::errors::{DatabaseError, Error};
    use meridian_core::plan::{MetricType, NewFinancialMetric, PeriodType};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn test_repository() -> (PlanRepository, Arc<crate::db::DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("temp dir");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("pool");
        run_migrations(&pool).expect("migrations");
        let writer = spawn_writer(Arc::clone(&pool));
        let repo = PlanRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn january_revenue() -> NewFinancialMetric {
        NewFinancialMetric {
            metric_type: MetricType::Revenue,
            period_type: PeriodType::Monthly,
            period_start: NaiveDate::from_ymd_opt(2026, 1, 1).expect("date"),
            target_value: Some(dec!(100000)),
            actual_value: None,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_metric_period_is_rejected() {
        let (repo, _pool, _dir) = test_repository().await;
        repo.create_metric(january_revenue()).await.expect("first row");

        let duplicate = repo.create_metric(january_revenue()).await;
        assert!(matches!(
            duplicate,
            Err(Error::Database(DatabaseError::UniqueViolation(_)))
        ));
    }

    #[tokio::test]
    async fn test_metric_values_survive_the_text_column() {
        let (repo, _pool, _dir) = test_repository().await;
        let mut metric = january_revenue();
        metric.actual_value = Some(dec!(12345.67));
        repo.create_metric(metric).await.expect("create");

        let rows = repo.list_metrics("revenue", 2026).expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target_value, Some(dec!(100000)));
        assert_eq!(rows[0].actual_value, Some(dec!(12345.67)));
    }

    #[tokio::test]
    async fn test_metrics_listed_for_requested_year_only() {
        let (repo, _pool, _dir) = test_repository().await;
        repo.create_metric(january_revenue()).await.expect("create");
        let mut other_year = january_revenue();
        other_year.period_start = NaiveDate::from_ymd_opt(2027, 1, 1).expect("date");
        repo.create_metric(other_year).await.expect("create");

        assert_eq!(repo.list_metrics("revenue", 2026).expect("list").len(), 1);
        assert_eq!(repo.list_metrics("revenue", 2027).expect("list").len(), 1);
        assert!(repo.list_metrics("revenue", 2025).expect("list").is_empty());
    }
}
