//! Outbound mail port - used only by the contact form.

use std::collections::BTreeMap;

use async_trait::async_trait;

/// Submitted contact-form fields, field name to value.
pub type ContactFields = BTreeMap<String, String>;

/// Mail relay - fire-and-forget outbound message to a fixed recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Format the fields into one message and hand it to the mail channel.
    async fn send(&self, fields: &ContactFields) -> Result<(), MailError>;
}

/// Mail delivery errors. Callers surface these as a generic delivery
/// failure; they never abort request handling.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Mail relay is not configured")]
    NotConfigured,
}
