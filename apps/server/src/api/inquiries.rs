use std::net::SocketAddr;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use meridian_core::inquiries::{
    ContactSubmission, NewContactSubmission, ProjectType, SubmissionFilters,
};
use meridian_core::paging::Page;
use serde::{Deserialize, Serialize};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

/// One replenished submission slot every 12 minutes with a burst of 5,
/// which is the 5-per-hour-per-IP contract.
const SUBMIT_REPLENISH_SECS: u64 = 720;
const SUBMIT_BURST: u32 = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitPayload {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(submission): Json<NewContactSubmission>,
) -> ApiResult<Json<SubmitPayload>> {
    let meta = super::request_meta(&addr, &headers);
    let outcome = state.inquiry_service.submit(submission, meta).await?;
    Ok(Json(SubmitPayload {
        id: outcome.submission.id,
        warning: outcome.warning,
    }))
}

#[derive(Deserialize)]
struct SubmissionListParams {
    is_read: Option<bool>,
    is_responded: Option<bool>,
    project_type: Option<ProjectType>,
    page: Option<i64>,
}

async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SubmissionListParams>,
) -> ApiResult<Json<Page<ContactSubmission>>> {
    let filters = SubmissionFilters {
        is_read: params.is_read,
        is_responded: params.is_responded,
        project_type: params.project_type,
    };
    let page = state
        .inquiry_service
        .list_submissions(filters, params.page.unwrap_or(1))?;
    Ok(Json(page))
}

async fn get_submission(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContactSubmission>> {
    let submission = state.inquiry_service.get_submission(&id)?;
    Ok(Json(submission))
}

async fn mark_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContactSubmission>> {
    Ok(Json(state.inquiry_service.mark_read(&id).await?))
}

async fn unmark_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContactSubmission>> {
    Ok(Json(state.inquiry_service.unmark_read(&id).await?))
}

async fn mark_responded(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContactSubmission>> {
    Ok(Json(state.inquiry_service.mark_responded(&id).await?))
}

async fn unmark_responded(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContactSubmission>> {
    Ok(Json(state.inquiry_service.unmark_responded(&id).await?))
}

pub async fn download_capability_statement(
    Path(doc_type): Path<String>,
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let meta = super::request_meta(&addr, &headers);
    let path = state
        .inquiry_service
        .capability_download(&doc_type, meta)
        .await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "capability_statement.pdf".to_string());
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(SUBMIT_REPLENISH_SECS)
            .burst_size(SUBMIT_BURST)
            .finish()
            .expect("Invalid rate limiter configuration"),
    );
    // The governor wraps only the submit handler; the reads added after
    // .layer() stay unlimited.
    Router::new()
        .route(
            "/contact",
            post(submit_contact)
                .layer(GovernorLayer::new(governor_conf))
                .get(list_submissions),
        )
        .route("/contact/{id}", get(get_submission))
        .route("/contact/{id}/read", post(mark_read).delete(unmark_read))
        .route(
            "/contact/{id}/responded",
            post(mark_responded).delete(unmark_responded),
        )
}
