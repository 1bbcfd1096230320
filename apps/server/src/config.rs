use std::{collections::HashMap, net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub capabilities_dir: String,
    /// Base URL prepended to feed links, no trailing slash.
    pub public_url: String,
    pub site_name: String,
    pub site_description: String,
    pub social_links: HashMap<String, String>,
    pub impact_metrics: HashMap<String, serde_json::Value>,
    pub mail_relay_url: Option<String>,
    pub from_email: String,
    pub contact_emails: Vec<String>,
    pub extra_contact_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("MERIDIAN_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid MERIDIAN_LISTEN_ADDR");
        let db_path = std::env::var("MERIDIAN_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = env_list("MERIDIAN_CORS_ALLOW_ORIGINS", "*");
        let timeout_ms: u64 = std::env::var("MERIDIAN_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let static_dir = std::env::var("MERIDIAN_STATIC_DIR").unwrap_or_else(|_| "dist".into());
        let capabilities_dir =
            std::env::var("MERIDIAN_CAPABILITIES_DIR").unwrap_or_else(|_| "capabilities".into());
        let public_url = std::env::var("MERIDIAN_PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .trim_end_matches('/')
            .to_string();
        let site_name =
            std::env::var("MERIDIAN_SITE_NAME").unwrap_or_else(|_| "Tawi Meridian".into());
        let site_description = std::env::var("MERIDIAN_SITE_DESCRIPTION").unwrap_or_else(|_| {
            "Engineering, data science and climate consulting.".into()
        });
        let social_links = env_json_map("MERIDIAN_SOCIAL_LINKS");
        let impact_metrics = env_json_map("MERIDIAN_IMPACT_METRICS");
        let mail_relay_url = std::env::var("MERIDIAN_MAIL_RELAY_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let from_email = std::env::var("MERIDIAN_FROM_EMAIL")
            .unwrap_or_else(|_| "no-reply@tawimeridian.com".into());
        let contact_emails = env_list(
            "MERIDIAN_CONTACT_EMAILS",
            "info@tawimeridian.com,partnerships@tawimeridian.com",
        );
        let extra_contact_email = std::env::var("MERIDIAN_EXTRA_CONTACT_EMAIL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            capabilities_dir,
            public_url,
            site_name,
            site_description,
            social_links,
            impact_metrics,
            mail_relay_url,
            from_email,
            contact_emails,
            extra_contact_email,
        }
    }
}

fn env_list(var: &str, default: &str) -> Vec<String> {
    std::env::var(var)
        .unwrap_or_else(|_| default.into())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_json_map<V: serde::de::DeserializeOwned>(var: &str) -> HashMap<String, V> {
    std::env::var(var)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}
