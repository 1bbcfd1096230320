//! CRM module - organizations, contacts, interaction history.

mod crm_model;
#[cfg(test)]
mod crm_model_tests;
mod crm_service;
mod crm_traits;

pub use crm_model::{
    Contact, ContactCategory, ContactDetail, ContactFilters, ContactInteraction, ContactRole,
    CrmDashboard, InteractionType, NewContact, NewContactCategory, NewContactInteraction,
    NewOrganization, NewOrganizationType, Organization, OrganizationDetail, OrganizationFilters,
    OrganizationListItem, OrganizationStatus, OrganizationType, PriorityCount,
};
pub use crm_service::CrmService;
pub use crm_traits::{CrmRepositoryTrait, CrmServiceTrait};
