//! Tests for the inquiry service with a recording mock mailer.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::inquiries::{
    BudgetRange, CapabilityDownload, ContactSubmission, DocumentType, InquiryRepositoryTrait,
    InquiryService, InquiryServiceTrait, NewContactSubmission, ProjectType, RequestMeta,
    SubmissionFilters,
};
use crate::mail::{MailerTrait, OutboundEmail};
use crate::paging::{Page, Pagination};
use crate::site::SiteConfig;

#[derive(Default)]
struct MockInquiryRepository {
    submissions: Mutex<Vec<ContactSubmission>>,
    downloads: Mutex<Vec<CapabilityDownload>>,
}

#[async_trait]
impl InquiryRepositoryTrait for MockInquiryRepository {
    fn list_submissions(
        &self,
        _filters: &SubmissionFilters,
        pagination: Pagination,
    ) -> Result<Page<ContactSubmission>> {
        let rows = self.submissions.lock().unwrap().clone();
        let total = rows.len() as i64;
        Ok(Page::new(rows, total, pagination))
    }

    fn get_submission(&self, id: &str) -> Result<ContactSubmission> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Submission".to_string()))
    }

    async fn create_submission(
        &self,
        submission: NewContactSubmission,
        meta: RequestMeta,
    ) -> Result<ContactSubmission> {
        let now = Utc::now().naive_utc();
        let stored = ContactSubmission {
            id: Uuid::new_v4().to_string(),
            name: submission.name,
            email: submission.email,
            organization: submission.organization,
            project_type: submission.project_type,
            message: submission.message,
            budget_range: submission.budget_range,
            is_read: false,
            read_at: None,
            is_responded: false,
            responded_at: None,
            notes: String::new(),
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            submitted_at: now,
            updated_at: now,
        };
        self.submissions.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn set_read(
        &self,
        id: &str,
        is_read: bool,
        at: Option<NaiveDateTime>,
    ) -> Result<ContactSubmission> {
        let mut rows = self.submissions.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound("Submission".to_string()))?;
        row.is_read = is_read;
        row.read_at = at;
        Ok(row.clone())
    }

    async fn set_responded(
        &self,
        id: &str,
        is_responded: bool,
        at: Option<NaiveDateTime>,
    ) -> Result<ContactSubmission> {
        let mut rows = self.submissions.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound("Submission".to_string()))?;
        row.is_responded = is_responded;
        row.responded_at = at;
        Ok(row.clone())
    }

    async fn create_download(
        &self,
        document_type: DocumentType,
        meta: RequestMeta,
    ) -> Result<CapabilityDownload> {
        let download = CapabilityDownload {
            id: Uuid::new_v4().to_string(),
            document_type,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            referer: meta.referer,
            downloaded_at: Utc::now().naive_utc(),
        };
        self.downloads.lock().unwrap().push(download.clone());
        Ok(download)
    }
}

#[derive(Default)]
struct MockMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: bool,
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send(&self, email: OutboundEmail) -> Result<()> {
        if self.fail {
            return Err(Error::MailDelivery("relay unreachable".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

fn config() -> Arc<SiteConfig> {
    Arc::new(SiteConfig {
        site_name: "Tawi Meridian".to_string(),
        contact_emails: vec![
            "info@example.org".to_string(),
            "partners@example.org".to_string(),
        ],
        extra_contact_email: Some("ops@example.org".to_string()),
        from_email: "no-reply@example.org".to_string(),
        ..Default::default()
    })
}

fn submission() -> NewContactSubmission {
    NewContactSubmission {
        name: "Amina Odhiambo".to_string(),
        email: "amina@example.org".to_string(),
        organization: "County Water Board".to_string(),
        project_type: ProjectType::Engineering,
        message: "We need help with a borehole telemetry rollout.".to_string(),
        budget_range: BudgetRange::Range100k250k,
    }
}

fn service(
    repository: Arc<MockInquiryRepository>,
    mailer: Arc<MockMailer>,
    capabilities_dir: PathBuf,
) -> InquiryService {
    InquiryService::new(repository, mailer, config(), capabilities_dir)
}

#[tokio::test]
async fn test_submit_stores_and_notifies() {
    let repo = Arc::new(MockInquiryRepository::default());
    let mailer = Arc::new(MockMailer::default());
    let service = service(repo.clone(), mailer.clone(), PathBuf::new());

    let meta = RequestMeta {
        ip_address: Some("203.0.113.9".to_string()),
        user_agent: "curl/8".to_string(),
        referer: String::new(),
    };
    let outcome = service.submit(submission(), meta).await.unwrap();

    assert!(outcome.warning.is_none());
    assert_eq!(repo.submissions.lock().unwrap().len(), 1);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    // Notification goes to both fixed addresses plus the configured extra.
    assert_eq!(
        sent[0].to,
        ["info@example.org", "partners@example.org", "ops@example.org"]
    );
    assert!(sent[0].body.contains("borehole telemetry"));
    // Auto-reply goes back to the submitter.
    assert_eq!(sent[1].to, ["amina@example.org"]);
}

#[tokio::test]
async fn test_submit_survives_mail_failure_with_warning() {
    let repo = Arc::new(MockInquiryRepository::default());
    let mailer = Arc::new(MockMailer {
        fail: true,
        ..Default::default()
    });
    let service = service(repo.clone(), mailer, PathBuf::new());

    let outcome = service
        .submit(submission(), RequestMeta::default())
        .await
        .unwrap();

    assert!(outcome.warning.is_some());
    // The stored row is not rolled back.
    assert_eq!(repo.submissions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_rejects_invalid_payload_without_storing() {
    let repo = Arc::new(MockInquiryRepository::default());
    let mailer = Arc::new(MockMailer::default());
    let service = service(repo.clone(), mailer.clone(), PathBuf::new());

    let mut bad = submission();
    bad.message = "too short".to_string();
    let err = service.submit(bad, RequestMeta::default()).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(repo.submissions.lock().unwrap().is_empty());
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_read_and_responded_flags_are_reversible() {
    let repo = Arc::new(MockInquiryRepository::default());
    let mailer = Arc::new(MockMailer::default());
    let service = service(repo.clone(), mailer, PathBuf::new());

    let outcome = service
        .submit(submission(), RequestMeta::default())
        .await
        .unwrap();
    let id = outcome.submission.id;

    let row = service.mark_read(&id).await.unwrap();
    assert!(row.is_read && row.read_at.is_some());
    assert!(!row.is_responded);

    let row = service.mark_responded(&id).await.unwrap();
    assert!(row.is_read && row.is_responded && row.responded_at.is_some());

    let row = service.unmark_read(&id).await.unwrap();
    assert!(!row.is_read && row.read_at.is_none());
    // The responded flag is independent of the read flag.
    assert!(row.is_responded);

    let row = service.unmark_responded(&id).await.unwrap();
    assert!(!row.is_responded && row.responded_at.is_none());
}

#[tokio::test]
async fn test_capability_download_tracks_and_resolves() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("federal_capability_statement.pdf"), b"%PDF").unwrap();

    let repo = Arc::new(MockInquiryRepository::default());
    let mailer = Arc::new(MockMailer::default());
    let service = service(repo.clone(), mailer, dir.path().to_path_buf());

    let path = service
        .capability_download("federal", RequestMeta::default())
        .await
        .unwrap();
    assert!(path.ends_with("federal_capability_statement.pdf"));
    assert_eq!(repo.downloads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_capability_download_rejects_unknown_type() {
    let repo = Arc::new(MockInquiryRepository::default());
    let mailer = Arc::new(MockMailer::default());
    let service = service(repo.clone(), mailer, PathBuf::from("/nonexistent"));

    let err = service
        .capability_download("bogus", RequestMeta::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    // No tracking row for an unknown type.
    assert!(repo.downloads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_capability_download_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(MockInquiryRepository::default());
    let mailer = Arc::new(MockMailer::default());
    let service = service(repo.clone(), mailer, dir.path().to_path_buf());

    let err = service
        .capability_download("general", RequestMeta::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
