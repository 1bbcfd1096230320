use std::sync::Arc;

use super::offerings_model::{
    NewOfferingFeature, NewServiceOffering, OfferingDetail, OfferingFeature, OfferingFilters,
    ServiceOffering,
};
use super::offerings_traits::{OfferingRepositoryTrait, OfferingServiceTrait};
use crate::constants::{FEATURED_LIMIT, OFFERINGS_PAGE_SIZE};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

/// Service for the public service catalog.
pub struct OfferingService {
    repository: Arc<dyn OfferingRepositoryTrait>,
}

impl OfferingService {
    pub fn new(repository: Arc<dyn OfferingRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl OfferingServiceTrait for OfferingService {
    fn list_offerings(
        &self,
        filters: OfferingFilters,
        page: i64,
    ) -> Result<Page<ServiceOffering>> {
        self.repository
            .list_active(&filters, Pagination::new(page, OFFERINGS_PAGE_SIZE))
    }

    fn get_offering(&self, slug: &str) -> Result<OfferingDetail> {
        let offering = self.repository.get_by_slug(slug)?;
        let features = self.repository.list_features(&offering.id)?;
        let other_offerings = self
            .repository
            .list_all_active()?
            .into_iter()
            .filter(|o| o.id != offering.id)
            .take(FEATURED_LIMIT as usize)
            .collect();
        Ok(OfferingDetail {
            offering,
            features,
            other_offerings,
        })
    }

    fn featured_offerings(&self) -> Result<Vec<ServiceOffering>> {
        Ok(self
            .repository
            .list_all_active()?
            .into_iter()
            .filter(|o| o.is_featured)
            .take(FEATURED_LIMIT as usize)
            .collect())
    }

    fn active_offerings(&self) -> Result<Vec<ServiceOffering>> {
        self.repository.list_all_active()
    }

    async fn create_offering(&self, offering: NewServiceOffering) -> Result<ServiceOffering> {
        offering.validate()?;
        self.repository.create(offering).await
    }

    async fn create_feature(&self, feature: NewOfferingFeature) -> Result<OfferingFeature> {
        self.repository.create_feature(feature).await
    }
}
