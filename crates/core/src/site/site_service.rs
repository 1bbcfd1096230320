use std::collections::HashMap;
use std::sync::Arc;

use super::site_model::{
    Certification, NewCertification, NewOfficeLocation, NewSiteSetting, OfficeLocation,
    SiteConfig, SiteContext, SiteSetting,
};
use super::site_traits::{SiteRepositoryTrait, SiteServiceTrait};
use crate::errors::Result;

/// Service for site-wide data.
pub struct SiteService {
    repository: Arc<dyn SiteRepositoryTrait>,
    config: Arc<SiteConfig>,
}

impl SiteService {
    pub fn new(repository: Arc<dyn SiteRepositoryTrait>, config: Arc<SiteConfig>) -> Self {
        Self { repository, config }
    }
}

#[async_trait::async_trait]
impl SiteServiceTrait for SiteService {
    fn site_context(&self) -> Result<SiteContext> {
        let settings: HashMap<String, String> = self
            .repository
            .list_settings()?
            .into_iter()
            .map(|s| (s.key, s.value))
            .collect();

        let office_locations = self.repository.list_office_locations()?;
        let primary_location = office_locations.iter().find(|l| l.is_primary).cloned();

        let featured_certifications = self
            .repository
            .list_certifications()?
            .into_iter()
            .filter(|c| c.is_featured && c.is_active())
            .collect();

        Ok(SiteContext {
            site_name: self.config.site_name.clone(),
            site_description: self.config.site_description.clone(),
            social_links: self.config.social_links.clone(),
            settings,
            office_locations,
            primary_location,
            featured_certifications,
        })
    }

    fn list_certifications(&self) -> Result<Vec<Certification>> {
        self.repository.list_certifications()
    }

    async fn upsert_setting(&self, setting: NewSiteSetting) -> Result<SiteSetting> {
        self.repository.upsert_setting(setting).await
    }

    async fn create_office_location(&self, location: NewOfficeLocation) -> Result<OfficeLocation> {
        self.repository.create_office_location(location).await
    }

    async fn create_certification(&self, certification: NewCertification) -> Result<Certification> {
        self.repository.create_certification(certification).await
    }
}
