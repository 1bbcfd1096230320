use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use meridian_core::inquiries::{
    CapabilityDownload, ContactSubmission, DocumentType, InquiryRepositoryTrait,
    NewContactSubmission, RequestMeta, SubmissionFilters,
};
use meridian_core::paging::{Page, Pagination};
use meridian_core::Result;

use super::model::{
    CapabilityDownloadDB, ContactSubmissionDB, NewCapabilityDownloadDB, NewContactSubmissionDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{capability_downloads, contact_submissions};

pub struct InquiryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InquiryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        InquiryRepository { pool, writer }
    }
}

#[async_trait]
impl InquiryRepositoryTrait for InquiryRepository {
    fn list_submissions(
        &self,
        filters: &SubmissionFilters,
        pagination: Pagination,
    ) -> Result<Page<ContactSubmission>> {
        let mut conn = get_connection(&self.pool)?;

        let build_query = || {
            let mut query = contact_submissions::table.into_boxed();
            if let Some(is_read) = filters.is_read {
                query = query.filter(contact_submissions::is_read.eq(is_read));
            }
            if let Some(is_responded) = filters.is_responded {
                query = query.filter(contact_submissions::is_responded.eq(is_responded));
            }
            if let Some(project_type) = filters.project_type {
                query = query.filter(contact_submissions::project_type.eq(project_type.as_str()));
            }
            query
        };

        let total = build_query()
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = build_query()
            .order(contact_submissions::submitted_at.desc())
            .limit(pagination.page_size)
            .offset(pagination.offset())
            .load::<ContactSubmissionDB>(&mut conn)
            .map_err(StorageError::from)?;

        let data = rows.into_iter().map(ContactSubmission::from).collect();
        Ok(Page::new(data, total, pagination))
    }

    fn get_submission(&self, submission_id: &str) -> Result<ContactSubmission> {
        let mut conn = get_connection(&self.pool)?;
        let row = contact_submissions::table
            .find(submission_id)
            .first::<ContactSubmissionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(ContactSubmission::from(row))
    }

    async fn create_submission(
        &self,
        submission: NewContactSubmission,
        meta: RequestMeta,
    ) -> Result<ContactSubmission> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContactSubmission> {
                let mut new_db = NewContactSubmissionDB::from_parts(submission, meta);
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(contact_submissions::table)
                    .values(&new_db)
                    .returning(ContactSubmissionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ContactSubmission::from(result_db))
            })
            .await
    }

    async fn set_read(
        &self,
        submission_id: &str,
        is_read: bool,
        at: Option<NaiveDateTime>,
    ) -> Result<ContactSubmission> {
        let submission_id = submission_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContactSubmission> {
                diesel::update(contact_submissions::table.find(submission_id.clone()))
                    .set((
                        contact_submissions::is_read.eq(is_read),
                        contact_submissions::read_at.eq(at),
                        contact_submissions::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = contact_submissions::table
                    .find(submission_id)
                    .first::<ContactSubmissionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(ContactSubmission::from(result_db))
            })
            .await
    }

    async fn set_responded(
        &self,
        submission_id: &str,
        is_responded: bool,
        at: Option<NaiveDateTime>,
    ) -> Result<ContactSubmission> {
        let submission_id = submission_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContactSubmission> {
                diesel::update(contact_submissions::table.find(submission_id.clone()))
                    .set((
                        contact_submissions::is_responded.eq(is_responded),
                        contact_submissions::responded_at.eq(at),
                        contact_submissions::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = contact_submissions::table
                    .find(submission_id)
                    .first::<ContactSubmissionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(ContactSubmission::from(result_db))
            })
            .await
    }

    async fn create_download(
        &self,
        document_type: DocumentType,
        meta: RequestMeta,
    ) -> Result<CapabilityDownload> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CapabilityDownload> {
                let mut new_db = NewCapabilityDownloadDB::from_parts(document_type, meta);
                new_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(capability_downloads::table)
                    .values(&new_db)
                    .returning(CapabilityDownloadDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(CapabilityDownload::from(result_db))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, get_connection, run_migrations, spawn_writer};
    use meridian_core::constants::USER_AGENT_MAX_LEN;
    use meridian_core::inquiries::{BudgetRange, ProjectType};
    use tempfile::tempdir;

    async fn test_repository() -> (InquiryRepository, Arc<crate::db::DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("temp dir");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("pool");
        run_migrations(&pool).expect("migrations");
        let writer = spawn_writer(Arc::clone(&pool));
        let repo = InquiryRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn sample_submission() -> NewContactSubmission {
        NewContactSubmission {
            name: "Jordan Reyes".to_string(),
            email: "jordan@example.org".to_string(),
            organization: String::new(),
            project_type: ProjectType::Engineering,
            budget_range: BudgetRange::NotSpecified,
            message: "We need help scoping a water project.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_oversized_user_agent_is_clamped() {
        let (repo, _pool, _dir) = test_repository().await;
        let meta = RequestMeta {
            ip_address: Some("203.0.113.9".to_string()),
            user_agent: "x".repeat(USER_AGENT_MAX_LEN + 100),
            referer: String::new(),
        };
        let stored = repo
            .create_submission(sample_submission(), meta)
            .await
            .expect("create");
        assert_eq!(stored.user_agent.chars().count(), USER_AGENT_MAX_LEN);
    }

    #[tokio::test]
    async fn test_read_flag_round_trip() {
        let (repo, _pool, _dir) = test_repository().await;
        let stored = repo
            .create_submission(sample_submission(), RequestMeta::default())
            .await
            .expect("create");
        assert!(!stored.is_read);

        let at = chrono::Utc::now().naive_utc();
        let marked = repo
            .set_read(&stored.id, true, Some(at))
            .await
            .expect("mark");
        assert!(marked.is_read);
        assert_eq!(marked.read_at, Some(at));

        let cleared = repo
            .set_read(&stored.id, false, None)
            .await
            .expect("clear");
        assert!(!cleared.is_read);
        assert!(cleared.read_at.is_none());
    }

    #[tokio::test]
    async fn test_download_row_is_recorded() {
        let (repo, pool, _dir) = test_repository().await;
        let recorded = repo
            .create_download(
                DocumentType::Federal,
                RequestMeta {
                    ip_address: None,
                    user_agent: "curl/8".to_string(),
                    referer: "https://example.org/contact/".to_string(),
                },
            )
            .await
            .expect("record");
        assert_eq!(recorded.document_type, DocumentType::Federal);

        let mut conn = get_connection(&pool).expect("conn");
        let rows = capability_downloads::table
            .load::<CapabilityDownloadDB>(&mut conn)
            .expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].document_type, "federal");
    }
}
