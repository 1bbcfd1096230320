//! SQLite storage implementation for portfolio case studies.

mod model;
mod repository;

pub use model::{
    CaseStudyDB, CaseStudyImageDB, CaseStudyTestimonialDB, NewCaseStudyDB, NewCaseStudyImageDB,
    NewCaseStudyTestimonialDB,
};
pub use repository::PortfolioRepository;
