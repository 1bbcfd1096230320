//! Site module - global configuration, office locations, certifications.

mod site_model;
mod site_service;
mod site_traits;

pub use site_model::{
    Certification, CertificationStatus, NewCertification, NewOfficeLocation, NewSiteSetting,
    OfficeLocation, SiteConfig, SiteContext, SiteSetting,
};
pub use site_service::SiteService;
pub use site_traits::{SiteRepositoryTrait, SiteServiceTrait};
