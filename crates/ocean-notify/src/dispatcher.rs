//! Results delivery.
//!
//! The dispatcher turns a scored session into one outbound message and feeds
//! the outcome back into the session as an event. A session that is already
//! notified is left alone, so calling [`Dispatcher::dispatch`] twice never
//! sends twice.

use std::sync::Arc;

use tracing::instrument;

use ocean_core::error::DispatchError;
use ocean_core::report::{render_body, subject};
use ocean_core::session::{Event, Session, SessionState};
use ocean_core::traits::{MailMessage, Mailer};

use crate::config::OceanConfig;
use crate::secrets::{resolve_mail_secrets, LayeredSecrets, SecretStore};
use crate::smtp::SmtpMailer;

/// What a dispatch call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The message was handed to the relay.
    Sent,
    /// The session was already notified; nothing was sent.
    AlreadySent,
}

/// Subject and body for a scored session, without addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPreview {
    pub subject: String,
    pub body: String,
}

/// Formats and delivers results for scored sessions.
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
    secrets: Box<dyn SecretStore>,
    report_title: String,
}

impl Dispatcher {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        secrets: Box<dyn SecretStore>,
        report_title: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            secrets,
            report_title: report_title.into(),
        }
    }

    /// SMTP delivery with environment-then-config secret lookup.
    pub fn from_config(config: &OceanConfig) -> Self {
        Self::new(
            Arc::new(SmtpMailer::new(&config.smtp)),
            Box::new(LayeredSecrets::standard(&config.secrets)),
            config.report.title.clone(),
        )
    }

    /// Render the report for a scored (or notified) session.
    pub fn preview(&self, state: &SessionState) -> Option<ReportPreview> {
        let profile = state.profile()?;
        let scores = state.scores()?;
        let responses = state.responses()?;
        Some(ReportPreview {
            subject: subject(&self.report_title, profile),
            body: render_body(profile, scores, responses),
        })
    }

    /// Deliver the session's results exactly once.
    ///
    /// Any failure moves the session to `Failed`; it is not retried.
    #[instrument(skip_all, fields(session = %session.id(), mailer = self.mailer.name()))]
    pub async fn dispatch(&self, session: &mut Session) -> Result<DispatchOutcome, DispatchError> {
        match session.state() {
            SessionState::Notified { .. } => {
                tracing::debug!("results already sent, skipping");
                return Ok(DispatchOutcome::AlreadySent);
            }
            SessionState::Failed { reason } => return Err(reason.clone()),
            SessionState::Scored { .. } => {}
            _ => return Err(DispatchError::NotScored),
        }

        let secrets = match resolve_mail_secrets(self.secrets.as_ref()) {
            Ok(secrets) => secrets,
            Err(e) => return Err(fail(session, e)),
        };

        let Some(preview) = self.preview(session.state()) else {
            return Err(DispatchError::NotScored);
        };
        let message = MailMessage {
            from: secrets.sender,
            to: secrets.receiver,
            subject: preview.subject,
            body: preview.body,
        };

        match self.mailer.send(&message, &secrets.credentials).await {
            Ok(()) => {
                tracing::info!(to = %message.to, "results sent");
                if let Err(e) = session.apply(Event::NotificationSent) {
                    tracing::error!(error = %e, "could not record delivery");
                }
                Ok(DispatchOutcome::Sent)
            }
            Err(e) => Err(fail(session, e)),
        }
    }
}

fn fail(session: &mut Session, err: DispatchError) -> DispatchError {
    tracing::error!(error = %err, permanent = err.is_permanent(), "results not sent");
    if let Err(e) = session.apply(Event::NotificationFailed(err.clone())) {
        tracing::error!(error = %e, "could not record failure");
    }
    err
}
