//! Outbound mail - the contact form relay.

mod smtp;

pub use smtp::{DisabledMailer, MailConfig, SmtpMailer, format_body};
