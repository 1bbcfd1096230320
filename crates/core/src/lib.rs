//! Meridian Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the Meridian consulting site
//! and its internal operations tools (business-plan tracker and CRM).
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod blog;
pub mod constants;
pub mod crm;
pub mod errors;
pub mod inquiries;
pub mod mail;
pub mod offerings;
pub mod paging;
pub mod plan;
pub mod portfolio;
pub mod site;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use paging::{Page, Pagination};
