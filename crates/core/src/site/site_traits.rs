//! Site repository and service traits.

use async_trait::async_trait;

use super::site_model::{
    Certification, NewCertification, NewOfficeLocation, NewSiteSetting, OfficeLocation,
    SiteContext, SiteSetting,
};
use crate::errors::Result;

/// Persistence contract for site-wide records. Storage-specific details are
/// handled by concrete implementations.
#[async_trait]
pub trait SiteRepositoryTrait: Send + Sync {
    fn list_settings(&self) -> Result<Vec<SiteSetting>>;
    async fn upsert_setting(&self, setting: NewSiteSetting) -> Result<SiteSetting>;

    /// Office locations ordered by display order then name.
    fn list_office_locations(&self) -> Result<Vec<OfficeLocation>>;
    async fn create_office_location(&self, location: NewOfficeLocation) -> Result<OfficeLocation>;

    /// Certifications ordered by display order then name.
    fn list_certifications(&self) -> Result<Vec<Certification>>;
    fn get_certification(&self, id: &str) -> Result<Certification>;
    async fn create_certification(&self, certification: NewCertification) -> Result<Certification>;
}

/// Business operations over site-wide data.
#[async_trait]
pub trait SiteServiceTrait: Send + Sync {
    /// The per-request context block: settings map, offices, primary office,
    /// featured active certifications.
    fn site_context(&self) -> Result<SiteContext>;

    fn list_certifications(&self) -> Result<Vec<Certification>>;
    async fn upsert_setting(&self, setting: NewSiteSetting) -> Result<SiteSetting>;
    async fn create_office_location(&self, location: NewOfficeLocation) -> Result<OfficeLocation>;
    async fn create_certification(&self, certification: NewCertification) -> Result<Certification>;
}
