//! Portfolio service: public list/detail reads and admin writes.

use std::collections::HashSet;
use std::sync::Arc;

use crate::constants::{FEATURED_LIMIT, PORTFOLIO_PAGE_SIZE, RELATED_LIMIT};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

use super::portfolio_model::{
    CaseStudy, CaseStudyDetail, CaseStudyFilters, CaseStudyImage, CaseStudyTestimonial,
    NewCaseStudy, NewCaseStudyImage, NewCaseStudyTestimonial,
};
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};

pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
}

impl PortfolioService {
    pub fn new(repository: Arc<dyn PortfolioRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Related work: up to two under the same offering, then one for the
    /// same client type under a different offering, deduplicated, cap three.
    fn related_case_studies(&self, case_study: &CaseStudy) -> Result<Vec<CaseStudy>> {
        let mut candidates = Vec::new();
        if let Some(offering_id) = &case_study.offering_id {
            candidates.extend(self.repository.list_same_offering(
                offering_id,
                &case_study.id,
                2,
            )?);
        }
        candidates.extend(self.repository.list_same_client_type(
            case_study.client_type.as_str(),
            case_study.offering_id.as_deref(),
            &case_study.id,
            1,
        )?);

        let mut seen: HashSet<String> = HashSet::new();
        let mut related = Vec::new();
        for candidate in candidates {
            if seen.insert(candidate.id.clone()) {
                related.push(candidate);
            }
            if related.len() == RELATED_LIMIT {
                break;
            }
        }
        Ok(related)
    }
}

#[async_trait::async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn list_case_studies(
        &self,
        filters: CaseStudyFilters,
        page: i64,
    ) -> Result<Page<CaseStudy>> {
        self.repository
            .list_published(&filters, Pagination::new(page, PORTFOLIO_PAGE_SIZE))
    }

    fn featured_case_studies(&self) -> Result<Vec<CaseStudy>> {
        self.repository.list_featured(FEATURED_LIMIT)
    }

    fn get_case_study(&self, slug: &str) -> Result<CaseStudyDetail> {
        let case_study = self.repository.get_published_by_slug(slug)?;
        let images = self.repository.list_images(&case_study.id)?;
        let testimonials = self.repository.list_testimonials(&case_study.id)?;
        let related_case_studies = self.related_case_studies(&case_study)?;
        let technologies = case_study.technologies_list();

        Ok(CaseStudyDetail {
            case_study,
            images,
            testimonials,
            related_case_studies,
            technologies,
        })
    }

    async fn create_case_study(&self, case_study: NewCaseStudy) -> Result<CaseStudy> {
        case_study.validate()?;
        self.repository.create(case_study).await
    }

    async fn create_image(&self, image: NewCaseStudyImage) -> Result<CaseStudyImage> {
        self.repository.create_image(image).await
    }

    async fn create_testimonial(
        &self,
        testimonial: NewCaseStudyTestimonial,
    ) -> Result<CaseStudyTestimonial> {
        self.repository.create_testimonial(testimonial).await
    }

    async fn delete_case_study(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await?;
        Ok(())
    }
}
