//! SQLite storage implementation for inquiries.

mod model;
mod repository;

pub use model::{
    CapabilityDownloadDB, ContactSubmissionDB, NewCapabilityDownloadDB, NewContactSubmissionDB,
};
pub use repository::InquiryRepository;
