//! Portfolio module - published case studies with images and testimonials.

mod portfolio_model;
#[cfg(test)]
mod portfolio_model_tests;
mod portfolio_service;
mod portfolio_traits;

pub use portfolio_model::{
    CaseStudy, CaseStudyDetail, CaseStudyFilters, CaseStudyImage, CaseStudyTestimonial,
    ClientType, NewCaseStudy, NewCaseStudyImage, NewCaseStudyTestimonial,
};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
