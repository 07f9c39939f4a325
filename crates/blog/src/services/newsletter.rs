//! Newsletter subscription service.
//!
//! Addresses are validated and normalized before they reach a
//! [`MailingList`]. The shipped [`LogMailingList`] records the signup in the
//! log and keeps nothing.

use async_trait::async_trait;
use pressroom_core::{Email, EmailError};
use thiserror::Error;
use tracing::instrument;

/// Confirmation shown after a successful subscription.
pub const SUBSCRIBED_MESSAGE: &str = "Thank you for subscribing to our newsletter!";

/// Errors that can occur when subscribing.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// The address failed validation.
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The mailing list backend rejected or failed the request.
    #[error("Mailing list error: {0}")]
    MailingList(String),
}

/// Destination for newsletter signups.
#[async_trait]
pub trait MailingList: Send + Sync {
    /// Add `email` to the list. Subscribing twice is not an error.
    async fn subscribe(&self, email: &Email) -> Result<(), NewsletterError>;
}

/// Mailing list that only logs signups.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailingList;

#[async_trait]
impl MailingList for LogMailingList {
    async fn subscribe(&self, email: &Email) -> Result<(), NewsletterError> {
        tracing::info!(domain = email.domain(), "Newsletter subscription received");
        Ok(())
    }
}

/// Validate `raw` and hand the normalized address to `list`.
///
/// # Errors
///
/// Returns `NewsletterError::InvalidEmail` if `raw` is not a valid address, or
/// whatever error the mailing list reports.
#[instrument(skip_all)]
pub async fn subscribe(list: &dyn MailingList, raw: &str) -> Result<Email, NewsletterError> {
    let email = Email::normalize(raw)?;
    list.subscribe(&email).await?;
    Ok(email)
}
