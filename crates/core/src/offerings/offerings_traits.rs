//! Offering repository and service traits.

use async_trait::async_trait;

use super::offerings_model::{
    NewOfferingFeature, NewServiceOffering, OfferingFeature, OfferingFilters, ServiceOffering,
};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

/// Persistence contract for the service catalog.
#[async_trait]
pub trait OfferingRepositoryTrait: Send + Sync {
    /// Active offerings matching the filters, ordered by
    /// (display_order, title).
    fn list_active(
        &self,
        filters: &OfferingFilters,
        pagination: Pagination,
    ) -> Result<Page<ServiceOffering>>;

    /// All active offerings in display order (navigation, homepage pillars).
    fn list_all_active(&self) -> Result<Vec<ServiceOffering>>;

    /// Active offering by slug.
    fn get_by_slug(&self, slug: &str) -> Result<ServiceOffering>;

    /// Features for one offering, ordered by display order.
    fn list_features(&self, offering_id: &str) -> Result<Vec<OfferingFeature>>;

    async fn create(&self, offering: NewServiceOffering) -> Result<ServiceOffering>;
    async fn create_feature(&self, feature: NewOfferingFeature) -> Result<OfferingFeature>;
}

/// Business operations over the service catalog.
#[async_trait]
pub trait OfferingServiceTrait: Send + Sync {
    fn list_offerings(
        &self,
        filters: OfferingFilters,
        page: i64,
    ) -> Result<Page<ServiceOffering>>;

    fn get_offering(&self, slug: &str) -> Result<super::OfferingDetail>;

    /// Featured active offerings for the homepage (limit 3).
    fn featured_offerings(&self) -> Result<Vec<ServiceOffering>>;

    /// Active offerings for navigation.
    fn active_offerings(&self) -> Result<Vec<ServiceOffering>>;

    async fn create_offering(&self, offering: NewServiceOffering) -> Result<ServiceOffering>;
    async fn create_feature(&self, feature: NewOfferingFeature) -> Result<OfferingFeature>;
}
