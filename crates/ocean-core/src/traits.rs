//! The mail transport seam.
//!
//! Implemented by `ocean-notify` (SMTP and a mock for tests).

use async_trait::async_trait;

use crate::error::DispatchError;

/// A fully formatted outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Login for the outbound relay.
///
/// Note: Custom Debug impl masks the password.
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Something that can deliver a [`MailMessage`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Human-readable transport name (e.g. "smtp").
    fn name(&self) -> &str;

    /// Send one message. Implementations never retry.
    async fn send(
        &self,
        message: &MailMessage,
        credentials: &MailCredentials,
    ) -> Result<(), DispatchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_masks_password() {
        let creds = MailCredentials {
            username: "sender@example.com".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("sender@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
