//! Mock mailer for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use ocean_core::error::DispatchError;
use ocean_core::traits::{MailCredentials, MailMessage, Mailer};

/// A mailer that records what it was asked to send instead of sending it.
///
/// Can be scripted to fail every attempt with a fixed error.
pub struct MockMailer {
    failure: Option<DispatchError>,
    call_count: AtomicU32,
    sent: Mutex<Vec<MailMessage>>,
}

impl MockMailer {
    /// A mock that accepts every message.
    pub fn new() -> Self {
        Self {
            failure: None,
            call_count: AtomicU32::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A mock whose every send fails with `error`.
    pub fn failing(error: DispatchError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// Number of send attempts, successful or not.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Messages that were accepted.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(
        &self,
        message: &MailMessage,
        _credentials: &MailCredentials,
    ) -> Result<(), DispatchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
