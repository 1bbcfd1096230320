//! SQLite storage implementation for the CRM.

mod model;
mod repository;

pub use model::{
    ContactCategoryDB, ContactDB, ContactInteractionDB, NewContactCategoryDB, NewContactDB,
    NewContactInteractionDB, NewOrganizationDB, NewOrganizationTypeDB, OrganizationDB,
    OrganizationTypeDB,
};
pub use repository::CrmRepository;
