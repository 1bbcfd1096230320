//! Outbound mail seam.
//!
//! The domain layer only knows how to compose plaintext messages; delivery is
//! behind `MailerTrait` so the server can plug in its HTTP relay client and
//! tests can plug in a recording mock.

mod mail_model;

pub use mail_model::OutboundEmail;

use crate::errors::Result;
use async_trait::async_trait;

/// Contract for sending a single plaintext email.
///
/// Implementations must not panic on delivery failure; they return an error
/// which callers treat as non-fatal (submissions are never rolled back on
/// notification failure).
#[async_trait]
pub trait MailerTrait: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<()>;
}
