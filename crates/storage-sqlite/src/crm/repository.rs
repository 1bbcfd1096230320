use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::{count_star, sql};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::SqliteConnection;
use uuid::Uuid;

use meridian_core::crm::{
    Contact, ContactCategory, ContactFilters, ContactInteraction, CrmRepositoryTrait, NewContact,
    NewContactCategory, NewContactInteraction, NewOrganization, NewOrganizationType, Organization,
    OrganizationFilters, OrganizationListItem, OrganizationType, PriorityCount,
};
use meridian_core::paging::{Page, Pagination};
use meridian_core::plan::Priority;
use meridian_core::Result;

use super::model::{
    ContactCategoryDB, ContactChangeset, ContactDB, ContactInteractionDB, NewContactCategoryDB,
    NewContactDB, NewContactInteractionDB, NewOrganizationDB, NewOrganizationTypeDB,
    OrganizationChangeset, OrganizationDB, OrganizationTypeDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{
    contact_categories, contact_interactions, contacts, organization_types, organizations,
};

/// Numeric rank for the textual priority column, used for descending sorts.
const PRIORITY_RANK: &str =
    "CASE priority WHEN 'critical' THEN 3 WHEN 'high' THEN 2 WHEN 'medium' THEN 1 ELSE 0 END";

pub struct CrmRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CrmRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CrmRepository { pool, writer }
    }
}

#[async_trait]
impl CrmRepositoryTrait for CrmRepository {
    fn list_organization_types(&self) -> Result<Vec<OrganizationType>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = organization_types::table
            .order((
                organization_types::display_order.asc(),
                organization_types::name.asc(),
            ))
            .load::<OrganizationTypeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(OrganizationType::from).collect())
    }

    fn get_organization_type(&self, type_id: &str) -> Result<OrganizationType> {
        let mut conn = get_connection(&self.pool)?;
        let row = organization_types::table
            .find(type_id)
            .first::<OrganizationTypeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(OrganizationType::from(row))
    }

    fn list_contact_categories(&self) -> Result<Vec<ContactCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contact_categories::table
            .order((
                contact_categories::display_order.asc(),
                contact_categories::name.asc(),
            ))
            .load::<ContactCategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ContactCategory::from).collect())
    }

    fn get_contact_category(&self, category_id: &str) -> Result<ContactCategory> {
        let mut conn = get_connection(&self.pool)?;
        let row = contact_categories::table
            .find(category_id)
            .first::<ContactCategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(ContactCategory::from(row))
    }

    fn list_organizations(
        &self,
        filters: &OrganizationFilters,
        pagination: Pagination,
    ) -> Result<Page<OrganizationListItem>> {
        let mut conn = get_connection(&self.pool)?;

        // Boxed queries cannot be cloned; the closure builds one for the
        // count and one for the page.
        let build_query = || {
            let mut query = organizations::table.into_boxed();
            if let Some(type_id) = &filters.type_id {
                query = query.filter(organizations::type_id.eq(type_id.clone()));
            }
            if let Some(category_id) = &filters.category_id {
                query = query.filter(organizations::category_id.eq(category_id.clone()));
            }
            if let Some(priority) = filters.priority {
                query = query.filter(organizations::priority.eq(priority.as_str()));
            }
            if let Some(status) = filters.status {
                query = query.filter(organizations::status.eq(status.as_str()));
            }
            if let Some(assignee) = &filters.assignee {
                query = query.filter(organizations::assignee.eq(assignee.clone()));
            }
            if let Some(search) = &filters.search {
                let pattern = format!("%{}%", search.trim());
                query = query.filter(
                    organizations::name
                        .like(pattern.clone())
                        .or(organizations::description.like(pattern.clone()))
                        .or(organizations::location.like(pattern.clone()))
                        .or(organizations::tags.like(pattern)),
                );
            }
            query
        };

        let total = build_query()
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = build_query()
            .order((sql::<Integer>(PRIORITY_RANK).desc(), organizations::name.asc()))
            .limit(pagination.page_size)
            .offset(pagination.offset())
            .load::<OrganizationDB>(&mut conn)
            .map_err(StorageError::from)?;

        // Contact headcounts for just this page, one grouped query.
        let org_ids: Vec<String> = rows.iter().map(|o| o.id.clone()).collect();
        let counts: HashMap<String, i64> = contacts::table
            .filter(contacts::organization_id.eq_any(&org_ids))
            .group_by(contacts::organization_id)
            .select((contacts::organization_id, count_star()))
            .load::<(String, i64)>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .collect();

        let data = rows
            .into_iter()
            .map(|db| {
                let contact_count = counts.get(&db.id).copied().unwrap_or(0);
                OrganizationListItem {
                    organization: Organization::from(db),
                    contact_count,
                }
            })
            .collect();
        Ok(Page::new(data, total, pagination))
    }

    fn get_organization(&self, organization_id: &str) -> Result<Organization> {
        let mut conn = get_connection(&self.pool)?;
        let row = organizations::table
            .find(organization_id)
            .first::<OrganizationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Organization::from(row))
    }

    fn count_organizations(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        organizations::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)
            .map_err(Into::into)
    }

    fn count_active_organizations(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        organizations::table
            .filter(organizations::status.eq("active"))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)
            .map_err(Into::into)
    }

    fn count_organizations_by_priority(&self) -> Result<Vec<PriorityCount>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = organizations::table
            .group_by(organizations::priority)
            .select((organizations::priority, count_star()))
            .load::<(String, i64)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(priority, count)| PriorityCount {
                priority: Priority::parse(&priority),
                count,
            })
            .collect())
    }

    fn list_recent_organizations(&self, limit: i64) -> Result<Vec<Organization>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = organizations::table
            .order(organizations::created_at.desc())
            .limit(limit)
            .load::<OrganizationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Organization::from).collect())
    }

    fn list_contacts(
        &self,
        filters: &ContactFilters,
        pagination: Pagination,
    ) -> Result<Page<Contact>> {
        let mut conn = get_connection(&self.pool)?;

        let build_query = || {
            let mut query = contacts::table
                .inner_join(organizations::table)
                .into_boxed();
            if let Some(organization_id) = &filters.organization_id {
                query = query.filter(contacts::organization_id.eq(organization_id.clone()));
            }
            if let Some(role) = filters.role {
                query = query.filter(contacts::role.eq(role.as_str()));
            }
            if let Some(is_primary) = filters.is_primary {
                query = query.filter(contacts::is_primary.eq(is_primary));
            }
            if let Some(is_active) = filters.is_active {
                query = query.filter(contacts::is_active.eq(is_active));
            }
            if let Some(search) = &filters.search {
                let pattern = format!("%{}%", search.trim());
                query = query.filter(
                    contacts::first_name
                        .like(pattern.clone())
                        .or(contacts::last_name.like(pattern.clone()))
                        .or(contacts::email.like(pattern.clone()))
                        .or(contacts::title.like(pattern.clone()))
                        .or(organizations::name.like(pattern)),
                );
            }
            query
        };

        let total = build_query()
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = build_query()
            .order((
                organizations::name.asc(),
                contacts::last_name.asc(),
                contacts::first_name.asc(),
            ))
            .limit(pagination.page_size)
            .offset(pagination.offset())
            .select(ContactDB::as_select())
            .load::<ContactDB>(&mut conn)
            .map_err(StorageError::from)?;

        let data = rows.into_iter().map(Contact::from).collect();
        Ok(Page::new(data, total, pagination))
    }

    fn get_contact(&self, contact_id: &str) -> Result<Contact> {
        let mut conn = get_connection(&self.pool)?;
        let row = contacts::table
            .find(contact_id)
            .first::<ContactDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Contact::from(row))
    }

    fn count_contacts(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        contacts::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)
            .map_err(Into::into)
    }

    fn list_contacts_for_organization(&self, for_organization_id: &str) -> Result<Vec<Contact>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contacts::table
            .filter(contacts::organization_id.eq(for_organization_id))
            .order((
                contacts::is_primary.desc(),
                contacts::last_name.asc(),
                contacts::first_name.asc(),
            ))
            .load::<ContactDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    fn list_interactions_for_organization(
        &self,
        for_organization_id: &str,
        limit: i64,
    ) -> Result<Vec<ContactInteraction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contact_interactions::table
            .filter(contact_interactions::organization_id.eq(for_organization_id))
            .order(contact_interactions::interaction_date.desc())
            .limit(limit)
            .load::<ContactInteractionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ContactInteraction::from).collect())
    }

    fn list_interactions_for_contact(
        &self,
        for_contact_id: &str,
        for_organization_id: &str,
        limit: i64,
    ) -> Result<Vec<ContactInteraction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contact_interactions::table
            .filter(contact_interactions::organization_id.eq(for_organization_id))
            .filter(
                contact_interactions::contact_id
                    .eq(for_contact_id)
                    .or(contact_interactions::contact_id.is_null()),
            )
            .order(contact_interactions::interaction_date.desc())
            .limit(limit)
            .load::<ContactInteractionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ContactInteraction::from).collect())
    }

    fn list_recent_interactions(&self, limit: i64) -> Result<Vec<ContactInteraction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contact_interactions::table
            .order(contact_interactions::interaction_date.desc())
            .limit(limit)
            .load::<ContactInteractionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ContactInteraction::from).collect())
    }

    fn list_upcoming_follow_ups(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
    ) -> Result<Vec<ContactInteraction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contact_interactions::table
            .filter(contact_interactions::next_action.ne(""))
            .filter(contact_interactions::next_action_date.between(from, to))
            .order(contact_interactions::next_action_date.asc())
            .limit(limit)
            .load::<ContactInteractionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ContactInteraction::from).collect())
    }

    async fn create_organization_type(
        &self,
        organization_type: NewOrganizationType,
    ) -> Result<OrganizationType> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<OrganizationType> {
                let mut new_db: NewOrganizationTypeDB = organization_type.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(organization_types::table)
                    .values(&new_db)
                    .returning(OrganizationTypeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(OrganizationType::from(result_db))
            })
            .await
    }

    async fn create_contact_category(
        &self,
        category: NewContactCategory,
    ) -> Result<ContactCategory> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContactCategory> {
                let mut new_db: NewContactCategoryDB = category.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(contact_categories::table)
                    .values(&new_db)
                    .returning(ContactCategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ContactCategory::from(result_db))
            })
            .await
    }

    async fn create_organization(&self, organization: NewOrganization) -> Result<Organization> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Organization> {
                let mut new_db: NewOrganizationDB = organization.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(organizations::table)
                    .values(&new_db)
                    .returning(OrganizationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Organization::from(result_db))
            })
            .await
    }

    async fn update_organization(
        &self,
        organization_id: &str,
        organization: NewOrganization,
    ) -> Result<Organization> {
        let organization_id = organization_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Organization> {
                let changes: OrganizationChangeset = organization.into();
                diesel::update(organizations::table.find(organization_id.clone()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = organizations::table
                    .find(organization_id)
                    .first::<OrganizationDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Organization::from(result_db))
            })
            .await
    }

    async fn delete_organization(&self, organization_id: &str) -> Result<usize> {
        let organization_id = organization_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(organizations::table.find(organization_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn create_contact(&self, contact: NewContact) -> Result<Contact> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contact> {
                let mut new_db: NewContactDB = contact.into();
                new_db.id = Some(Uuid::new_v4().to_string());

                // The partial unique index allows one primary per
                // organization; demote the old one before inserting.
                if new_db.is_primary {
                    diesel::update(
                        contacts::table
                            .filter(contacts::organization_id.eq(&new_db.organization_id))
                            .filter(contacts::is_primary.eq(true)),
                    )
                    .set(contacts::is_primary.eq(false))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }

                let result_db = diesel::insert_into(contacts::table)
                    .values(&new_db)
                    .returning(ContactDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Contact::from(result_db))
            })
            .await
    }

    async fn update_contact(&self, contact_id: &str, contact: NewContact) -> Result<Contact> {
        let contact_id = contact_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contact> {
                let changes: ContactChangeset = contact.into();

                if changes.is_primary {
                    diesel::update(
                        contacts::table
                            .filter(contacts::organization_id.eq(&changes.organization_id))
                            .filter(contacts::is_primary.eq(true))
                            .filter(contacts::id.ne(&contact_id)),
                    )
                    .set(contacts::is_primary.eq(false))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }

                diesel::update(contacts::table.find(contact_id.clone()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = contacts::table
                    .find(contact_id)
                    .first::<ContactDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Contact::from(result_db))
            })
            .await
    }

    async fn delete_contact(&self, contact_id: &str) -> Result<usize> {
        let contact_id = contact_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(contacts::table.find(contact_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn create_interaction(
        &self,
        interaction: NewContactInteraction,
    ) -> Result<ContactInteraction> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<ContactInteraction> {
                    let mut new_db: NewContactInteractionDB = interaction.into();
                    new_db.id = Some(Uuid::new_v4().to_string());

                    let result_db = diesel::insert_into(contact_interactions::table)
                        .values(&new_db)
                        .returning(ContactInteractionDB::as_returning())
                        .get_result::<ContactInteractionDB>(conn)
                        .map_err(StorageError::from)?;

                    // The interaction moves last_contacted on both parents.
                    diesel::update(organizations::table.find(&result_db.organization_id))
                        .set(organizations::last_contacted.eq(result_db.interaction_date))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    if let Some(attached_contact) = &result_db.contact_id {
                        diesel::update(contacts::table.find(attached_contact))
                            .set(contacts::last_contacted.eq(result_db.interaction_date))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }

                    Ok(ContactInteraction::from(result_db))
                },
            )
            .await
    }

    async fn delete_interaction(&self, interaction_id: &str) -> Result<usize> {
        let interaction_id = interaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(contact_interactions::table.find(interaction_id))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::Utc;
    use meridian_core::crm::{InteractionType, OrganizationStatus};
    use tempfile::tempdir;

    async fn test_repository() -> (CrmRepository, Arc<crate::db::DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("temp dir");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("pool");
        run_migrations(&pool).expect("migrations");
        let writer = spawn_writer(Arc::clone(&pool));
        let repo = CrmRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn sample_organization(name: &str) -> NewOrganization {
        NewOrganization {
            name: name.to_string(),
            type_id: None,
            category_id: None,
            website: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            location: String::new(),
            description: String::new(),
            key_notes: String::new(),
            contact_strategy: String::new(),
            priority: Priority::Medium,
            status: OrganizationStatus::Prospect,
            assignee: None,
            tags: String::new(),
        }
    }

    fn sample_contact(organization_id: &str, last_name: &str, is_primary: bool) -> NewContact {
        NewContact {
            organization_id: organization_id.to_string(),
            first_name: "Dana".to_string(),
            last_name: last_name.to_string(),
            title: String::new(),
            role: None,
            is_primary,
            email: String::new(),
            phone: String::new(),
            mobile: String::new(),
            office_location: String::new(),
            notes: String::new(),
            key_info: String::new(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_new_primary_contact_demotes_the_old_one() {
        let (repo, _pool, _dir) = test_repository().await;
        let org = repo
            .create_organization(sample_organization("Harbor Authority"))
            .await
            .expect("org");

        let first = repo
            .create_contact(sample_contact(&org.id, "Alpha", true))
            .await
            .expect("first contact");
        let second = repo
            .create_contact(sample_contact(&org.id, "Beta", true))
            .await
            .expect("second contact");

        let contacts = repo
            .list_contacts_for_organization(&org.id)
            .expect("contacts");
        let primaries: Vec<_> = contacts.iter().filter(|c| c.is_primary).collect();
        assert_eq!(primaries.len(), 1);
        assert_eq!(primaries[0].id, second.id);
        assert_eq!(contacts[0].id, second.id, "primary sorts first");
        assert!(!repo.get_contact(&first.id).expect("reload").is_primary);
    }

    #[tokio::test]
    async fn test_update_to_primary_demotes_the_old_one() {
        let (repo, _pool, _dir) = test_repository().await;
        let org = repo
            .create_organization(sample_organization("Harbor Authority"))
            .await
            .expect("org");
        let first = repo
            .create_contact(sample_contact(&org.id, "Alpha", true))
            .await
            .expect("first contact");
        let second = repo
            .create_contact(sample_contact(&org.id, "Beta", false))
            .await
            .expect("second contact");

        repo.update_contact(&second.id, sample_contact(&org.id, "Beta", true))
            .await
            .expect("promote");

        assert!(!repo.get_contact(&first.id).expect("reload").is_primary);
        assert!(repo.get_contact(&second.id).expect("reload").is_primary);
    }

    #[tokio::test]
    async fn test_interaction_stamps_last_contacted() {
        let (repo, _pool, _dir) = test_repository().await;
        let org = repo
            .create_organization(sample_organization("Harbor Authority"))
            .await
            .expect("org");
        let contact = repo
            .create_contact(sample_contact(&org.id, "Alpha", true))
            .await
            .expect("contact");
        assert!(org.last_contacted.is_none());

        let when = Utc::now().naive_utc();
        repo.create_interaction(NewContactInteraction {
            contact_id: Some(contact.id.clone()),
            organization_id: org.id.clone(),
            interaction_type: InteractionType::Meeting,
            subject: "Kickoff".to_string(),
            notes: String::new(),
            interaction_date: when,
            next_action: String::new(),
            next_action_date: None,
        })
        .await
        .expect("interaction");

        assert_eq!(
            repo.get_organization(&org.id).expect("org").last_contacted,
            Some(when)
        );
        assert_eq!(
            repo.get_contact(&contact.id).expect("contact").last_contacted,
            Some(when)
        );
    }

    #[tokio::test]
    async fn test_organization_page_carries_contact_counts() {
        let (repo, _pool, _dir) = test_repository().await;
        let org_a = repo
            .create_organization(sample_organization("Alpha Org"))
            .await
            .expect("org");
        let org_b = repo
            .create_organization(sample_organization("Beta Org"))
            .await
            .expect("org");
        repo.create_contact(sample_contact(&org_a.id, "One", true))
            .await
            .expect("contact");
        repo.create_contact(sample_contact(&org_a.id, "Two", false))
            .await
            .expect("contact");

        let page = repo
            .list_organizations(&OrganizationFilters::default(), Pagination::new(1, 25))
            .expect("page");
        assert_eq!(page.meta.total_row_count, 2);
        let by_name: std::collections::HashMap<_, _> = page
            .data
            .iter()
            .map(|row| (row.organization.name.clone(), row.contact_count))
            .collect();
        assert_eq!(by_name["Alpha Org"], 2);
        assert_eq!(by_name[&org_b.name], 0);
    }
}
