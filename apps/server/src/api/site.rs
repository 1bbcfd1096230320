use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use meridian_core::site::{
    Certification, NewCertification, NewOfficeLocation, NewSiteSetting, OfficeLocation,
    SiteContext, SiteSetting,
};

async fn get_site_context(State(state): State<Arc<AppState>>) -> ApiResult<Json<SiteContext>> {
    let context = state.site_service.site_context()?;
    Ok(Json(context))
}

async fn list_certifications(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Certification>>> {
    let certifications = state.site_service.list_certifications()?;
    Ok(Json(certifications))
}

async fn upsert_setting(
    State(state): State<Arc<AppState>>,
    Json(setting): Json<NewSiteSetting>,
) -> ApiResult<Json<SiteSetting>> {
    let stored = state.site_service.upsert_setting(setting).await?;
    Ok(Json(stored))
}

async fn create_office_location(
    State(state): State<Arc<AppState>>,
    Json(location): Json<NewOfficeLocation>,
) -> ApiResult<Json<OfficeLocation>> {
    let stored = state.site_service.create_office_location(location).await?;
    Ok(Json(stored))
}

async fn create_certification(
    State(state): State<Arc<AppState>>,
    Json(certification): Json<NewCertification>,
) -> ApiResult<Json<Certification>> {
    let stored = state.site_service.create_certification(certification).await?;
    Ok(Json(stored))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/site", get(get_site_context))
        .route("/site/settings", put(upsert_setting))
        .route("/site/offices", post(create_office_location))
        .route(
            "/site/certifications",
            get(list_certifications).post(create_certification),
        )
}
