//! SMTP mail relay built on lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use quill_core::ports::{ContactFields, MailError, Mailer};

/// SMTP relay configuration. Every message goes to the one fixed
/// recipient.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub username: String,
    pub password: String,
    pub from: String,
    pub recipient: String,
}

/// Authenticated SMTP mailer.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| MailError::Delivery(e.to_string()))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::Delivery(e.to_string()))?;
        let to: Mailbox = config
            .recipient
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::Delivery(e.to_string()))?;

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, fields: &ContactFields) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject("New contact form message")
            .body(format_body(fields))
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        tracing::info!("Contact message relayed");
        Ok(())
    }
}

/// Stand-in used when the relay is not configured; the contact endpoint
/// degrades to a delivery failure instead of the server refusing to start.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _fields: &ContactFields) -> Result<(), MailError> {
        tracing::warn!("Mail settings missing - dropping contact message");
        Err(MailError::NotConfigured)
    }
}

/// Render the submitted fields as one "Label: value" line per field,
/// labels title-cased.
pub fn format_body(fields: &ContactFields) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}: {}", title_case(name), value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_case(field: &str) -> String {
    field
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_body_title_cases_labels() {
        let mut fields = ContactFields::new();
        fields.insert("name".to_string(), "Ann".to_string());
        fields.insert("phone_number".to_string(), "555-0101".to_string());
        fields.insert("message".to_string(), "Hello there".to_string());

        let body = format_body(&fields);

        // BTreeMap iteration keeps field order deterministic.
        assert_eq!(body, "Message: Hello there\nName: Ann\nPhone Number: 555-0101");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("email"), "Email");
        assert_eq!(title_case("phone_number"), "Phone Number");
        assert_eq!(title_case("already Done"), "Already Done");
    }

    #[tokio::test]
    async fn test_disabled_mailer_reports_not_configured() {
        let err = DisabledMailer.send(&ContactFields::new()).await.unwrap_err();
        assert!(matches!(err, MailError::NotConfigured));
    }
}
