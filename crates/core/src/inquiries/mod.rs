//! Inquiries module - public contact form and capability downloads.

mod inquiries_model;
#[cfg(test)]
mod inquiries_model_tests;
mod inquiries_service;
#[cfg(test)]
mod inquiries_service_tests;
mod inquiries_traits;

pub use inquiries_model::{
    BudgetRange, CapabilityDownload, ContactSubmission, DocumentType, NewContactSubmission,
    ProjectType, RequestMeta, SubmissionFilters, SubmissionOutcome,
};
pub use inquiries_service::InquiryService;
pub use inquiries_traits::{InquiryRepositoryTrait, InquiryServiceTrait};
