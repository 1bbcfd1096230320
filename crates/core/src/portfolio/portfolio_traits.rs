//! Portfolio repository and service traits.

use async_trait::async_trait;

use super::portfolio_model::{
    CaseStudy, CaseStudyDetail, CaseStudyFilters, CaseStudyImage, CaseStudyTestimonial,
    NewCaseStudy, NewCaseStudyImage, NewCaseStudyTestimonial,
};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

/// Persistence contract for case studies. All reads are restricted to
/// published rows.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Published case studies matching the filters, ordered by
    /// (-published_date, -created_at).
    fn list_published(
        &self,
        filters: &CaseStudyFilters,
        pagination: Pagination,
    ) -> Result<Page<CaseStudy>>;

    /// Published case study by slug.
    fn get_published_by_slug(&self, slug: &str) -> Result<CaseStudy>;

    /// Published featured case studies, newest first.
    fn list_featured(&self, limit: i64) -> Result<Vec<CaseStudy>>;

    /// Published case studies under the same offering, excluding one row.
    fn list_same_offering(
        &self,
        offering_id: &str,
        exclude_id: &str,
        limit: i64,
    ) -> Result<Vec<CaseStudy>>;

    /// Published case studies for a client type under a different offering,
    /// excluding one row.
    fn list_same_client_type(
        &self,
        client_type: &str,
        exclude_offering_id: Option<&str>,
        exclude_id: &str,
        limit: i64,
    ) -> Result<Vec<CaseStudy>>;

    /// Images for a case study, ordered by display_order.
    fn list_images(&self, case_study_id: &str) -> Result<Vec<CaseStudyImage>>;

    /// Testimonials for a case study, ordered by display_order.
    fn list_testimonials(&self, case_study_id: &str) -> Result<Vec<CaseStudyTestimonial>>;

    async fn create(&self, case_study: NewCaseStudy) -> Result<CaseStudy>;
    async fn create_image(&self, image: NewCaseStudyImage) -> Result<CaseStudyImage>;
    async fn create_testimonial(
        &self,
        testimonial: NewCaseStudyTestimonial,
    ) -> Result<CaseStudyTestimonial>;
    async fn delete(&self, id: &str) -> Result<usize>;
}

/// Business operations over the portfolio.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn list_case_studies(
        &self,
        filters: CaseStudyFilters,
        page: i64,
    ) -> Result<Page<CaseStudy>>;

    /// Featured case studies for the home page (limit 3).
    fn featured_case_studies(&self) -> Result<Vec<CaseStudy>>;

    /// Case study detail with images, testimonials and related work
    /// (same offering first, then same client type, cap 3).
    fn get_case_study(&self, slug: &str) -> Result<CaseStudyDetail>;

    async fn create_case_study(&self, case_study: NewCaseStudy) -> Result<CaseStudy>;
    async fn create_image(&self, image: NewCaseStudyImage) -> Result<CaseStudyImage>;
    async fn create_testimonial(
        &self,
        testimonial: NewCaseStudyTestimonial,
    ) -> Result<CaseStudyTestimonial>;
    async fn delete_case_study(&self, id: &str) -> Result<()>;
}
