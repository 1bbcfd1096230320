//! CRM service: list/detail assembly and the relationship dashboard.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};

use crate::constants::{
    CONTACTS_PAGE_SIZE, ORGANIZATIONS_PAGE_SIZE, ORGANIZATION_INTERACTIONS_LIMIT,
    RECENT_INTERACTIONS_LIMIT, RECENT_ORGANIZATIONS_LIMIT, UPCOMING_FOLLOW_UPS_LIMIT,
};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

use super::crm_model::{
    Contact, ContactCategory, ContactDetail, ContactFilters, ContactInteraction, CrmDashboard,
    NewContact, NewContactCategory, NewContactInteraction, NewOrganization, NewOrganizationType,
    Organization, OrganizationDetail, OrganizationFilters, OrganizationListItem, OrganizationType,
};
use super::crm_traits::{CrmRepositoryTrait, CrmServiceTrait};

/// Window for surfacing follow-ups on the dashboard.
const FOLLOW_UP_WINDOW_DAYS: u64 = 30;

pub struct CrmService {
    repository: Arc<dyn CrmRepositoryTrait>,
}

impl CrmService {
    pub fn new(repository: Arc<dyn CrmRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[async_trait::async_trait]
impl CrmServiceTrait for CrmService {
    fn dashboard(&self) -> Result<CrmDashboard> {
        let today = Self::today();
        let horizon = today
            .checked_add_days(Days::new(FOLLOW_UP_WINDOW_DAYS))
            .unwrap_or(today);

        Ok(CrmDashboard {
            total_organizations: self.repository.count_organizations()?,
            total_contacts: self.repository.count_contacts()?,
            active_organizations: self.repository.count_active_organizations()?,
            recent_interactions: self
                .repository
                .list_recent_interactions(RECENT_INTERACTIONS_LIMIT)?,
            organizations_by_priority: self.repository.count_organizations_by_priority()?,
            upcoming_follow_ups: self.repository.list_upcoming_follow_ups(
                today,
                horizon,
                UPCOMING_FOLLOW_UPS_LIMIT,
            )?,
            recent_organizations: self
                .repository
                .list_recent_organizations(RECENT_ORGANIZATIONS_LIMIT)?,
        })
    }

    fn list_organization_types(&self) -> Result<Vec<OrganizationType>> {
        self.repository.list_organization_types()
    }

    fn list_contact_categories(&self) -> Result<Vec<ContactCategory>> {
        self.repository.list_contact_categories()
    }

    fn list_organizations(
        &self,
        filters: OrganizationFilters,
        page: i64,
    ) -> Result<Page<OrganizationListItem>> {
        self.repository
            .list_organizations(&filters, Pagination::new(page, ORGANIZATIONS_PAGE_SIZE))
    }

    fn get_organization(&self, id: &str) -> Result<OrganizationDetail> {
        let organization = self.repository.get_organization(id)?;
        let organization_type = match &organization.type_id {
            Some(type_id) => Some(self.repository.get_organization_type(type_id)?),
            None => None,
        };
        let category = match &organization.category_id {
            Some(category_id) => Some(self.repository.get_contact_category(category_id)?),
            None => None,
        };
        let contacts = self
            .repository
            .list_contacts_for_organization(&organization.id)?;
        let interactions = self.repository.list_interactions_for_organization(
            &organization.id,
            ORGANIZATION_INTERACTIONS_LIMIT,
        )?;

        Ok(OrganizationDetail {
            organization,
            organization_type,
            category,
            contacts,
            interactions,
        })
    }

    fn list_contacts(&self, filters: ContactFilters, page: i64) -> Result<Page<Contact>> {
        self.repository
            .list_contacts(&filters, Pagination::new(page, CONTACTS_PAGE_SIZE))
    }

    fn get_contact(&self, id: &str) -> Result<ContactDetail> {
        let contact = self.repository.get_contact(id)?;
        let organization = self.repository.get_organization(&contact.organization_id)?;
        let interactions = self.repository.list_interactions_for_contact(
            &contact.id,
            &contact.organization_id,
            ORGANIZATION_INTERACTIONS_LIMIT,
        )?;
        Ok(ContactDetail {
            contact,
            organization,
            interactions,
        })
    }

    async fn create_organization_type(
        &self,
        organization_type: NewOrganizationType,
    ) -> Result<OrganizationType> {
        self.repository
            .create_organization_type(organization_type)
            .await
    }

    async fn create_contact_category(
        &self,
        category: NewContactCategory,
    ) -> Result<ContactCategory> {
        self.repository.create_contact_category(category).await
    }

    async fn create_organization(&self, organization: NewOrganization) -> Result<Organization> {
        organization.validate()?;
        self.repository.create_organization(organization).await
    }

    async fn update_organization(
        &self,
        id: &str,
        organization: NewOrganization,
    ) -> Result<Organization> {
        organization.validate()?;
        self.repository.update_organization(id, organization).await
    }

    async fn delete_organization(&self, id: &str) -> Result<()> {
        self.repository.delete_organization(id).await?;
        Ok(())
    }

    async fn create_contact(&self, contact: NewContact) -> Result<Contact> {
        contact.validate()?;
        self.repository.create_contact(contact).await
    }

    async fn update_contact(&self, id: &str, contact: NewContact) -> Result<Contact> {
        contact.validate()?;
        self.repository.update_contact(id, contact).await
    }

    async fn delete_contact(&self, id: &str) -> Result<()> {
        self.repository.delete_contact(id).await?;
        Ok(())
    }

    async fn create_interaction(
        &self,
        interaction: NewContactInteraction,
    ) -> Result<ContactInteraction> {
        interaction.validate()?;
        self.repository.create_interaction(interaction).await
    }

    async fn delete_interaction(&self, id: &str) -> Result<()> {
        self.repository.delete_interaction(id).await?;
        Ok(())
    }
}
