use std::collections::HashMap;
use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use meridian_core::constants::FEATURED_LIMIT;
use meridian_core::offerings::ServiceOffering;
use meridian_core::portfolio::CaseStudy;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HomePayload {
    featured_case_studies: Vec<CaseStudy>,
    offerings: Vec<ServiceOffering>,
    impact_metrics: HashMap<String, serde_json::Value>,
}

async fn get_home(State(state): State<Arc<AppState>>) -> ApiResult<Json<HomePayload>> {
    let featured_case_studies = state.portfolio_service.featured_case_studies()?;
    let offerings = state
        .offering_service
        .active_offerings()?
        .into_iter()
        .take(FEATURED_LIMIT as usize)
        .collect();
    Ok(Json(HomePayload {
        featured_case_studies,
        offerings,
        impact_metrics: state.site_config.impact_metrics.clone(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/home", get(get_home))
}
