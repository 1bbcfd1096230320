//! Inquiry service: the contact-form pipeline and capability downloads.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};

use crate::constants::SUBMISSIONS_PAGE_SIZE;
use crate::errors::{Error, Result};
use crate::mail::{MailerTrait, OutboundEmail};
use crate::paging::{Page, Pagination};
use crate::site::SiteConfig;

use super::inquiries_model::{
    ContactSubmission, DocumentType, NewContactSubmission, RequestMeta, SubmissionFilters,
    SubmissionOutcome,
};
use super::inquiries_traits::{InquiryRepositoryTrait, InquiryServiceTrait};

pub struct InquiryService {
    repository: Arc<dyn InquiryRepositoryTrait>,
    mailer: Arc<dyn MailerTrait>,
    config: Arc<SiteConfig>,
    capabilities_dir: PathBuf,
}

impl InquiryService {
    pub fn new(
        repository: Arc<dyn InquiryRepositoryTrait>,
        mailer: Arc<dyn MailerTrait>,
        config: Arc<SiteConfig>,
        capabilities_dir: PathBuf,
    ) -> Self {
        Self {
            repository,
            mailer,
            config,
            capabilities_dir,
        }
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn notification_email(&self, submission: &ContactSubmission) -> OutboundEmail {
        let body = format!(
            "New contact form submission\n\n\
             Name: {}\n\
             Email: {}\n\
             Organization: {}\n\
             Project type: {}\n\
             Budget range: {}\n\n\
             Message:\n{}\n",
            submission.name,
            submission.email,
            submission.organization,
            submission.project_type.as_str(),
            submission.budget_range.as_str(),
            submission.message,
        );
        OutboundEmail::new(
            self.config.from_email.clone(),
            self.config.notification_recipients(),
            format!("New inquiry from {}", submission.name),
            body,
        )
    }

    fn auto_reply(&self, submission: &ContactSubmission) -> OutboundEmail {
        let body = format!(
            "Dear {},\n\n\
             Thank you for contacting {}. We have received your message and\n\
             will get back to you within two business days.\n\n\
             Regards,\n{}\n",
            submission.name, self.config.site_name, self.config.site_name,
        );
        OutboundEmail::new(
            self.config.from_email.clone(),
            vec![submission.email.clone()],
            format!("Thank you for contacting {}", self.config.site_name),
            body,
        )
    }
}

#[async_trait::async_trait]
impl InquiryServiceTrait for InquiryService {
    async fn submit(
        &self,
        submission: NewContactSubmission,
        meta: RequestMeta,
    ) -> Result<SubmissionOutcome> {
        submission.validate()?;
        let stored = self.repository.create_submission(submission, meta).await?;

        let mut warning = None;
        if let Err(err) = self.mailer.send(self.notification_email(&stored)).await {
            log::error!("inquiry notification failed for {}: {}", stored.id, err);
            warning = Some("your message was received, but staff notification failed".to_string());
        }
        if let Err(err) = self.mailer.send(self.auto_reply(&stored)).await {
            // Auto-reply failure is invisible to staff workflows.
            log::warn!("inquiry auto-reply failed for {}: {}", stored.id, err);
        }

        Ok(SubmissionOutcome {
            submission: stored,
            warning,
        })
    }

    fn list_submissions(
        &self,
        filters: SubmissionFilters,
        page: i64,
    ) -> Result<Page<ContactSubmission>> {
        self.repository
            .list_submissions(&filters, Pagination::new(page, SUBMISSIONS_PAGE_SIZE))
    }

    fn get_submission(&self, id: &str) -> Result<ContactSubmission> {
        self.repository.get_submission(id)
    }

    async fn mark_read(&self, id: &str) -> Result<ContactSubmission> {
        self.repository.set_read(id, true, Some(Self::now())).await
    }

    async fn unmark_read(&self, id: &str) -> Result<ContactSubmission> {
        self.repository.set_read(id, false, None).await
    }

    async fn mark_responded(&self, id: &str) -> Result<ContactSubmission> {
        self.repository
            .set_responded(id, true, Some(Self::now()))
            .await
    }

    async fn unmark_responded(&self, id: &str) -> Result<ContactSubmission> {
        self.repository.set_responded(id, false, None).await
    }

    async fn capability_download(&self, doc_type: &str, meta: RequestMeta) -> Result<PathBuf> {
        let document_type = DocumentType::parse(doc_type)
            .ok_or_else(|| Error::NotFound("Capability statement".to_string()))?;

        if let Err(err) = self.repository.create_download(document_type, meta).await {
            log::error!("capability download tracking failed: {}", err);
        }

        let path = self.capabilities_dir.join(document_type.file_name());
        if !path.is_file() {
            return Err(Error::NotFound("Capability statement".to_string()));
        }
        Ok(path)
    }
}
