//! SMTP mail transport.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::instrument;

use ocean_core::error::DispatchError;
use ocean_core::traits::{MailCredentials, MailMessage, Mailer};

use crate::config::SmtpConfig;

/// Reply code for rejected credentials.
const AUTH_FAILED_CODE: &str = "535";

/// Delivers messages through an authenticated STARTTLS relay.
pub struct SmtpMailer {
    host: String,
    port: u16,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn transport(
        &self,
        credentials: &MailCredentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, DispatchError> {
        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| DispatchError::Connection(e.to_string()))?;
        Ok(builder
            .port(self.port)
            .timeout(Some(self.timeout))
            .credentials(Credentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ))
            .build())
    }
}

/// Build the wire message from a formatted [`MailMessage`].
pub fn build_message(message: &MailMessage) -> Result<Message, DispatchError> {
    let from: Mailbox = message
        .from
        .parse()
        .map_err(|_| DispatchError::InvalidAddress(message.from.clone()))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|_| DispatchError::InvalidAddress(message.to.clone()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| DispatchError::Message(e.to_string()))
}

fn classify(err: lettre::transport::smtp::Error) -> DispatchError {
    let code = err.status().map(|c| c.to_string());
    classify_reply(code.as_deref(), err.to_string())
}

/// Map a relay reply code (if the relay answered at all) to a dispatch error.
fn classify_reply(code: Option<&str>, message: String) -> DispatchError {
    match code {
        Some(AUTH_FAILED_CODE) => DispatchError::AuthenticationFailed(message),
        Some(code) => DispatchError::Rejected {
            code: code.to_string(),
            message,
        },
        None => DispatchError::Connection(message),
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    #[instrument(skip_all, fields(relay = %self.host, port = self.port))]
    async fn send(
        &self,
        message: &MailMessage,
        credentials: &MailCredentials,
    ) -> Result<(), DispatchError> {
        let email = build_message(message)?;
        let transport = self.transport(credentials)?;

        let response = transport.send(email).await.map_err(classify)?;
        tracing::info!(code = %response.code(), "relay accepted message");
        Ok(())
    }
}
