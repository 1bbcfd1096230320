//! CRM repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::crm_model::{
    Contact, ContactCategory, ContactDetail, ContactFilters, ContactInteraction, CrmDashboard,
    NewContact, NewContactCategory, NewContactInteraction, NewOrganization, NewOrganizationType,
    Organization, OrganizationDetail, OrganizationFilters, OrganizationListItem, OrganizationType,
    PriorityCount,
};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

/// Persistence contract for the CRM.
#[async_trait]
pub trait CrmRepositoryTrait: Send + Sync {
    fn list_organization_types(&self) -> Result<Vec<OrganizationType>>;
    fn get_organization_type(&self, id: &str) -> Result<OrganizationType>;
    fn list_contact_categories(&self) -> Result<Vec<ContactCategory>>;
    fn get_contact_category(&self, id: &str) -> Result<ContactCategory>;

    /// Organizations matching the filters with their contact counts,
    /// ordered by (-priority, name).
    fn list_organizations(
        &self,
        filters: &OrganizationFilters,
        pagination: Pagination,
    ) -> Result<Page<OrganizationListItem>>;

    fn get_organization(&self, id: &str) -> Result<Organization>;

    fn count_organizations(&self) -> Result<i64>;
    fn count_active_organizations(&self) -> Result<i64>;
    fn count_organizations_by_priority(&self) -> Result<Vec<PriorityCount>>;

    /// Organizations most recently added, newest first.
    fn list_recent_organizations(&self, limit: i64) -> Result<Vec<Organization>>;

    /// Contacts matching the filters, ordered by
    /// (organization name, last_name, first_name).
    fn list_contacts(
        &self,
        filters: &ContactFilters,
        pagination: Pagination,
    ) -> Result<Page<Contact>>;

    fn get_contact(&self, id: &str) -> Result<Contact>;
    fn count_contacts(&self) -> Result<i64>;

    /// Contacts of one organization, primary first then by name.
    fn list_contacts_for_organization(&self, organization_id: &str) -> Result<Vec<Contact>>;

    /// Interactions for an organization, newest first.
    fn list_interactions_for_organization(
        &self,
        organization_id: &str,
        limit: i64,
    ) -> Result<Vec<ContactInteraction>>;

    /// Interactions attached to the contact or logged contact-less against
    /// the organization, newest first.
    fn list_interactions_for_contact(
        &self,
        contact_id: &str,
        organization_id: &str,
        limit: i64,
    ) -> Result<Vec<ContactInteraction>>;

    /// Latest interactions across the CRM, newest first.
    fn list_recent_interactions(&self, limit: i64) -> Result<Vec<ContactInteraction>>;

    /// Interactions with a non-empty next action due inside the window,
    /// soonest first.
    fn list_upcoming_follow_ups(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
    ) -> Result<Vec<ContactInteraction>>;

    async fn create_organization_type(
        &self,
        organization_type: NewOrganizationType,
    ) -> Result<OrganizationType>;
    async fn create_contact_category(
        &self,
        category: NewContactCategory,
    ) -> Result<ContactCategory>;
    async fn create_organization(&self, organization: NewOrganization) -> Result<Organization>;
    async fn update_organization(
        &self,
        id: &str,
        organization: NewOrganization,
    ) -> Result<Organization>;
    async fn delete_organization(&self, id: &str) -> Result<usize>;

    /// Inserts a contact. When the row claims `is_primary`, the previous
    /// primary of the organization is demoted in the same transaction.
    async fn create_contact(&self, contact: NewContact) -> Result<Contact>;
    async fn update_contact(&self, id: &str, contact: NewContact) -> Result<Contact>;
    async fn delete_contact(&self, id: &str) -> Result<usize>;

    /// Inserts an interaction and stamps `last_contacted` on the
    /// organization and the attached contact in the same transaction.
    async fn create_interaction(
        &self,
        interaction: NewContactInteraction,
    ) -> Result<ContactInteraction>;
    async fn delete_interaction(&self, id: &str) -> Result<usize>;
}

/// Business operations over the CRM.
#[async_trait]
pub trait CrmServiceTrait: Send + Sync {
    fn dashboard(&self) -> Result<CrmDashboard>;

    fn list_organization_types(&self) -> Result<Vec<OrganizationType>>;
    fn list_contact_categories(&self) -> Result<Vec<ContactCategory>>;

    fn list_organizations(
        &self,
        filters: OrganizationFilters,
        page: i64,
    ) -> Result<Page<OrganizationListItem>>;

    /// Organization with its contacts (primary first) and latest
    /// interactions.
    fn get_organization(&self, id: &str) -> Result<OrganizationDetail>;

    fn list_contacts(&self, filters: ContactFilters, page: i64) -> Result<Page<Contact>>;

    /// Contact with its organization and interaction history.
    fn get_contact(&self, id: &str) -> Result<ContactDetail>;

    async fn create_organization_type(
        &self,
        organization_type: NewOrganizationType,
    ) -> Result<OrganizationType>;
    async fn create_contact_category(
        &self,
        category: NewContactCategory,
    ) -> Result<ContactCategory>;
    async fn create_organization(&self, organization: NewOrganization) -> Result<Organization>;
    async fn update_organization(
        &self,
        id: &str,
        organization: NewOrganization,
    ) -> Result<Organization>;
    async fn delete_organization(&self, id: &str) -> Result<()>;
    async fn create_contact(&self, contact: NewContact) -> Result<Contact>;
    async fn update_contact(&self, id: &str, contact: NewContact) -> Result<Contact>;
    async fn delete_contact(&self, id: &str) -> Result<()>;
    async fn create_interaction(
        &self,
        interaction: NewContactInteraction,
    ) -> Result<ContactInteraction>;
    async fn delete_interaction(&self, id: &str) -> Result<()>;
}
