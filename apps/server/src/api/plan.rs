use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use meridian_core::plan::{
    CertificationTracking, FinancialMetric, FinancialOverview, Milestone, MilestoneDetail,
    MilestoneFilters, MilestonePeriod, MilestoneStatus, NewCertificationTracking,
    NewFinancialMetric, NewMilestone, NewMilestonePeriod, NewOpportunity, NewPlanTask,
    Opportunity, OpportunityFilters, OpportunityStatus, PeriodOverview, PipelineOverview,
    PlanDashboard, PlanTask, TrackingOverview, TrackingStatus,
};
use serde::Deserialize;

async fn get_dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<PlanDashboard>> {
    Ok(Json(state.plan_service.dashboard()?))
}

async fn list_periods(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PeriodOverview>>> {
    Ok(Json(state.plan_service.period_overviews()?))
}

async fn create_period(
    State(state): State<Arc<AppState>>,
    Json(period): Json<NewMilestonePeriod>,
) -> ApiResult<Json<MilestonePeriod>> {
    Ok(Json(state.plan_service.create_period(period).await?))
}

#[derive(Deserialize)]
struct MilestoneListParams {
    period_id: Option<String>,
    status: Option<MilestoneStatus>,
    assignee: Option<String>,
}

async fn list_milestones(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MilestoneListParams>,
) -> ApiResult<Json<Vec<Milestone>>> {
    let filters = MilestoneFilters {
        period_id: params.period_id,
        status: params.status,
        assignee: params.assignee,
    };
    Ok(Json(state.plan_service.list_milestones(filters)?))
}

async fn get_milestone(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MilestoneDetail>> {
    Ok(Json(state.plan_service.get_milestone(&id)?))
}

async fn create_milestone(
    State(state): State<Arc<AppState>>,
    Json(milestone): Json<NewMilestone>,
) -> ApiResult<Json<Milestone>> {
    Ok(Json(state.plan_service.create_milestone(milestone).await?))
}

async fn update_milestone(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(milestone): Json<NewMilestone>,
) -> ApiResult<Json<Milestone>> {
    Ok(Json(
        state.plan_service.update_milestone(&id, milestone).await?,
    ))
}

async fn delete_milestone(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.plan_service.delete_milestone(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(task): Json<NewPlanTask>,
) -> ApiResult<Json<PlanTask>> {
    Ok(Json(state.plan_service.create_task(task).await?))
}

async fn update_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(task): Json<NewPlanTask>,
) -> ApiResult<Json<PlanTask>> {
    Ok(Json(state.plan_service.update_task(&id, task).await?))
}

async fn delete_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.plan_service.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct FinancialParams {
    year: Option<i32>,
}

async fn get_financials(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FinancialParams>,
) -> ApiResult<Json<FinancialOverview>> {
    Ok(Json(state.plan_service.financial_overview(params.year)?))
}

async fn create_metric(
    State(state): State<Arc<AppState>>,
    Json(metric): Json<NewFinancialMetric>,
) -> ApiResult<Json<FinancialMetric>> {
    Ok(Json(state.plan_service.create_metric(metric).await?))
}

async fn update_metric(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(metric): Json<NewFinancialMetric>,
) -> ApiResult<Json<FinancialMetric>> {
    Ok(Json(state.plan_service.update_metric(&id, metric).await?))
}

async fn delete_metric(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.plan_service.delete_metric(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct PipelineParams {
    status: Option<OpportunityStatus>,
    assignee: Option<String>,
}

async fn get_pipeline(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PipelineParams>,
) -> ApiResult<Json<PipelineOverview>> {
    let filters = OpportunityFilters {
        status: params.status,
        assignee: params.assignee,
    };
    Ok(Json(state.plan_service.pipeline(filters)?))
}

async fn create_opportunity(
    State(state): State<Arc<AppState>>,
    Json(opportunity): Json<NewOpportunity>,
) -> ApiResult<Json<Opportunity>> {
    Ok(Json(
        state.plan_service.create_opportunity(opportunity).await?,
    ))
}

async fn update_opportunity(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(opportunity): Json<NewOpportunity>,
) -> ApiResult<Json<Opportunity>> {
    Ok(Json(
        state
            .plan_service
            .update_opportunity(&id, opportunity)
            .await?,
    ))
}

async fn delete_opportunity(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.plan_service.delete_opportunity(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct CertificationParams {
    status: Option<TrackingStatus>,
}

async fn get_certifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CertificationParams>,
) -> ApiResult<Json<TrackingOverview>> {
    Ok(Json(state.plan_service.certifications(params.status)?))
}

async fn create_tracking(
    State(state): State<Arc<AppState>>,
    Json(tracking): Json<NewCertificationTracking>,
) -> ApiResult<Json<CertificationTracking>> {
    Ok(Json(state.plan_service.create_tracking(tracking).await?))
}

async fn update_tracking(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(tracking): Json<NewCertificationTracking>,
) -> ApiResult<Json<CertificationTracking>> {
    Ok(Json(
        state.plan_service.update_tracking(&id, tracking).await?,
    ))
}

async fn delete_tracking(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.plan_service.delete_tracking(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/periods", get(list_periods).post(create_period))
        .route("/milestones", get(list_milestones).post(create_milestone))
        .route(
            "/milestones/{id}",
            get(get_milestone)
                .put(update_milestone)
                .delete(delete_milestone),
        )
        .route("/tasks", post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/financials", get(get_financials).post(create_metric))
        .route(
            "/financials/{id}",
            put(update_metric).delete(delete_metric),
        )
        .route("/pipeline", get(get_pipeline))
        .route("/opportunities", post(create_opportunity))
        .route(
            "/opportunities/{id}",
            put(update_opportunity).delete(delete_opportunity),
        )
        .route(
            "/certifications",
            get(get_certifications).post(create_tracking),
        )
        .route(
            "/certifications/{id}",
            put(update_tracking).delete(delete_tracking),
        )
}
