use std::path::PathBuf;
use std::sync::Arc;

use crate::{config::Config, mailer::RelayMailer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use meridian_core::{
    blog::{BlogService, BlogServiceTrait},
    crm::{CrmService, CrmServiceTrait},
    inquiries::{InquiryService, InquiryServiceTrait},
    offerings::{OfferingService, OfferingServiceTrait},
    plan::{PlanService, PlanServiceTrait},
    portfolio::{PortfolioService, PortfolioServiceTrait},
    site::{SiteConfig, SiteService, SiteServiceTrait},
};
use meridian_storage_sqlite::{
    blog::BlogRepository, create_pool, crm::CrmRepository, init, inquiries::InquiryRepository,
    offerings::OfferingRepository, plan::PlanRepository, portfolio::PortfolioRepository,
    run_migrations, site::SiteRepository, spawn_writer,
};

pub struct AppState {
    pub site_service: Arc<dyn SiteServiceTrait>,
    pub offering_service: Arc<dyn OfferingServiceTrait>,
    pub blog_service: Arc<dyn BlogServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub plan_service: Arc<dyn PlanServiceTrait>,
    pub crm_service: Arc<dyn CrmServiceTrait>,
    pub inquiry_service: Arc<dyn InquiryServiceTrait>,
    pub site_config: Arc<SiteConfig>,
    pub public_url: String,
}

/// Text output by default; `MERIDIAN_LOG_FORMAT=json` switches to one JSON
/// object per line.
pub fn init_tracing() {
    let json = std::env::var("MERIDIAN_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let fmt_layer = if json {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer().boxed()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn site_config(config: &Config) -> SiteConfig {
    SiteConfig {
        site_name: config.site_name.clone(),
        site_description: config.site_description.clone(),
        social_links: config.social_links.clone(),
        impact_metrics: config.impact_metrics.clone(),
        contact_emails: config.contact_emails.clone(),
        extra_contact_email: config.extra_contact_email.clone(),
        from_email: config.from_email.clone(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(Arc::clone(&pool));

    let site_config = Arc::new(site_config(config));
    let mailer = Arc::new(RelayMailer::new(config.mail_relay_url.clone()));

    let site_repo = Arc::new(SiteRepository::new(Arc::clone(&pool), writer.clone()));
    let site_service = Arc::new(SiteService::new(site_repo, site_config.clone()));

    let offering_repo = Arc::new(OfferingRepository::new(Arc::clone(&pool), writer.clone()));
    let offering_service = Arc::new(OfferingService::new(offering_repo));

    let blog_repo = Arc::new(BlogRepository::new(Arc::clone(&pool), writer.clone()));
    let blog_service = Arc::new(BlogService::new(blog_repo));

    let portfolio_repo = Arc::new(PortfolioRepository::new(Arc::clone(&pool), writer.clone()));
    let portfolio_service = Arc::new(PortfolioService::new(portfolio_repo));

    let plan_repo = Arc::new(PlanRepository::new(Arc::clone(&pool), writer.clone()));
    let plan_service = Arc::new(PlanService::new(plan_repo));

    let crm_repo = Arc::new(CrmRepository::new(Arc::clone(&pool), writer.clone()));
    let crm_service = Arc::new(CrmService::new(crm_repo));

    let inquiry_repo = Arc::new(InquiryRepository::new(Arc::clone(&pool), writer.clone()));
    let inquiry_service = Arc::new(InquiryService::new(
        inquiry_repo,
        mailer,
        site_config.clone(),
        PathBuf::from(&config.capabilities_dir),
    ));

    Ok(Arc::new(AppState {
        site_service,
        offering_service,
        blog_service,
        portfolio_service,
        plan_service,
        crm_service,
        inquiry_service,
        site_config,
        public_url: config.public_url.clone(),
    }))
}
