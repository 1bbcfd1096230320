use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use meridian_core::offerings::{
    NewOfferingFeature, NewServiceOffering, OfferingDetail, OfferingFeature, OfferingFilters,
    ServiceOffering,
};
use meridian_core::paging::Page;
use serde::Deserialize;

#[derive(Deserialize)]
struct OfferingListParams {
    featured: Option<bool>,
    search: Option<String>,
    page: Option<i64>,
}

async fn list_offerings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OfferingListParams>,
) -> ApiResult<Json<Page<ServiceOffering>>> {
    let filters = OfferingFilters {
        featured: params.featured,
        search: params.search,
    };
    let page = state
        .offering_service
        .list_offerings(filters, params.page.unwrap_or(1))?;
    Ok(Json(page))
}

async fn get_offering(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<OfferingDetail>> {
    let detail = state.offering_service.get_offering(&slug)?;
    Ok(Json(detail))
}

async fn create_offering(
    State(state): State<Arc<AppState>>,
    Json(offering): Json<NewServiceOffering>,
) -> ApiResult<Json<ServiceOffering>> {
    let stored = state.offering_service.create_offering(offering).await?;
    Ok(Json(stored))
}

async fn create_feature(
    State(state): State<Arc<AppState>>,
    Json(feature): Json<NewOfferingFeature>,
) -> ApiResult<Json<OfferingFeature>> {
    let stored = state.offering_service.create_feature(feature).await?;
    Ok(Json(stored))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/services", get(list_offerings).post(create_offering))
        .route("/services/{slug}", get(get_offering))
        .route("/services/features", post(create_feature))
}
