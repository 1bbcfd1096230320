//! Inquiry repository and service traits.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::inquiries_model::{
    CapabilityDownload, ContactSubmission, DocumentType, NewContactSubmission, RequestMeta,
    SubmissionFilters, SubmissionOutcome,
};
use crate::errors::Result;
use crate::paging::{Page, Pagination};

/// Persistence contract for submissions and download tracking.
#[async_trait]
pub trait InquiryRepositoryTrait: Send + Sync {
    /// Submissions matching the filters, newest first.
    fn list_submissions(
        &self,
        filters: &SubmissionFilters,
        pagination: Pagination,
    ) -> Result<Page<ContactSubmission>>;

    fn get_submission(&self, id: &str) -> Result<ContactSubmission>;

    async fn create_submission(
        &self,
        submission: NewContactSubmission,
        meta: RequestMeta,
    ) -> Result<ContactSubmission>;

    /// Sets or clears the read flag with its timestamp.
    async fn set_read(
        &self,
        id: &str,
        is_read: bool,
        at: Option<NaiveDateTime>,
    ) -> Result<ContactSubmission>;

    /// Sets or clears the responded flag with its timestamp.
    async fn set_responded(
        &self,
        id: &str,
        is_responded: bool,
        at: Option<NaiveDateTime>,
    ) -> Result<ContactSubmission>;

    async fn create_download(
        &self,
        document_type: DocumentType,
        meta: RequestMeta,
    ) -> Result<CapabilityDownload>;
}

/// Business operations over inquiries.
#[async_trait]
pub trait InquiryServiceTrait: Send + Sync {
    /// Validates and stores a submission, then attempts the notification
    /// and auto-reply emails. Delivery failure never rolls the stored row
    /// back; it surfaces as a warning on the outcome.
    async fn submit(
        &self,
        submission: NewContactSubmission,
        meta: RequestMeta,
    ) -> Result<SubmissionOutcome>;

    fn list_submissions(
        &self,
        filters: SubmissionFilters,
        page: i64,
    ) -> Result<Page<ContactSubmission>>;

    fn get_submission(&self, id: &str) -> Result<ContactSubmission>;

    async fn mark_read(&self, id: &str) -> Result<ContactSubmission>;
    async fn unmark_read(&self, id: &str) -> Result<ContactSubmission>;
    async fn mark_responded(&self, id: &str) -> Result<ContactSubmission>;
    async fn unmark_responded(&self, id: &str) -> Result<ContactSubmission>;

    /// Records a download and resolves the statement file. Unknown types
    /// and missing files both surface as NotFound; a failed tracking insert
    /// does not block the download.
    async fn capability_download(&self, doc_type: &str, meta: RequestMeta) -> Result<PathBuf>;
}
