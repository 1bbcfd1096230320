use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState};
use meridian_core::inquiries::RequestMeta;

pub mod blog;
pub mod crm;
pub mod health;
pub mod home;
pub mod inquiries;
pub mod offerings;
pub mod plan;
pub mod portfolio;
pub mod site;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .merge(health::router())
        .merge(site::router())
        .merge(home::router())
        .merge(blog::router())
        .merge(portfolio::router())
        .merge(offerings::router())
        .merge(inquiries::router())
        .nest("/plan", plan::router())
        .nest("/crm", crm::router());

    Router::new()
        .nest("/api", api)
        .route("/insights/feed/", get(blog::insights_feed))
        .route(
            "/capabilities/{doc_type}/download",
            get(inquiries::download_capability_statement),
        )
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Request metadata captured for submissions and download tracking.
pub(crate) fn request_meta(addr: &SocketAddr, headers: &HeaderMap) -> RequestMeta {
    RequestMeta {
        ip_address: Some(addr.ip().to_string()),
        user_agent: header_value(headers, header::USER_AGENT.as_str()),
        referer: header_value(headers, header::REFERER.as_str()),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
