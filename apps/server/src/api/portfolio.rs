use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use meridian_core::paging::Page;
use meridian_core::portfolio::{
    CaseStudy, CaseStudyDetail, CaseStudyFilters, CaseStudyImage, CaseStudyTestimonial,
    ClientType, NewCaseStudy, NewCaseStudyImage, NewCaseStudyTestimonial,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct CaseStudyListParams {
    client_type: Option<ClientType>,
    /// Offering slug, matching the public URL scheme.
    service: Option<String>,
    featured: Option<bool>,
    search: Option<String>,
    page: Option<i64>,
}

async fn list_case_studies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CaseStudyListParams>,
) -> ApiResult<Json<Page<CaseStudy>>> {
    let filters = CaseStudyFilters {
        client_type: params.client_type,
        offering_slug: params.service,
        featured: params.featured,
        search: params.search,
    };
    let page = state
        .portfolio_service
        .list_case_studies(filters, params.page.unwrap_or(1))?;
    Ok(Json(page))
}

async fn get_case_study(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CaseStudyDetail>> {
    let detail = state.portfolio_service.get_case_study(&slug)?;
    Ok(Json(detail))
}

async fn create_case_study(
    State(state): State<Arc<AppState>>,
    Json(case_study): Json<NewCaseStudy>,
) -> ApiResult<Json<CaseStudy>> {
    let stored = state.portfolio_service.create_case_study(case_study).await?;
    Ok(Json(stored))
}

async fn create_image(
    State(state): State<Arc<AppState>>,
    Json(image): Json<NewCaseStudyImage>,
) -> ApiResult<Json<CaseStudyImage>> {
    let stored = state.portfolio_service.create_image(image).await?;
    Ok(Json(stored))
}

async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    Json(testimonial): Json<NewCaseStudyTestimonial>,
) -> ApiResult<Json<CaseStudyTestimonial>> {
    let stored = state.portfolio_service.create_testimonial(testimonial).await?;
    Ok(Json(stored))
}

async fn delete_case_study(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.portfolio_service.delete_case_study(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(list_case_studies).post(create_case_study))
        .route("/portfolio/{slug}", get(get_case_study))
        .route("/portfolio/id/{id}", delete(delete_case_study))
        .route("/portfolio/images", post(create_image))
        .route("/portfolio/testimonials", post(create_testimonial))
}
