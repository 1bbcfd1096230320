//! SQLite storage implementation for site-wide records.

mod model;
mod repository;

pub use model::{
    CertificationDB, NewCertificationDB, NewOfficeLocationDB, NewSiteSettingDB, OfficeLocationDB,
    SiteSettingDB,
};
pub use repository::SiteRepository;
