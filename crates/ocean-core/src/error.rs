//! Error types shared across the ocean workspace.
//!
//! `DispatchError` lives here rather than in `ocean-notify` so the session
//! state machine can record a failure reason without depending on the
//! transport crate.

use thiserror::Error;

/// A value fell outside its permitted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("rating {0} is outside 1..=5")]
    Rating(u8),

    #[error("age {0} is outside 10..=100")]
    Age(u32),

    #[error("statement index {0} is outside 0..25")]
    StatementIndex(usize),
}

/// An event was not valid for the session's current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The event does not apply to the current state.
    #[error("cannot apply {event} while {state}")]
    InvalidEvent {
        event: &'static str,
        state: &'static str,
    },

    /// Submit was attempted before every statement had a rating.
    #[error("{unanswered} statement(s) still unanswered")]
    Incomplete { unanswered: usize },

    /// The session already reached a terminal state.
    #[error("session is {0}; start a new session to try again")]
    Terminal(&'static str),

    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Errors raised while formatting or transmitting the results message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// One or more required secrets were absent or empty.
    #[error("missing secrets: {}", .0.join(", "))]
    MissingSecrets(Vec<String>),

    /// A sender or recipient address could not be parsed.
    #[error("invalid mail address: {0}")]
    InvalidAddress(String),

    /// The message could not be built.
    #[error("failed to build message: {0}")]
    Message(String),

    /// The relay rejected the sender credential.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The relay answered with an error status.
    #[error("relay rejected message ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The relay could not be reached or the TLS upgrade failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Dispatch was requested for a session that has not been scored.
    #[error("session has not been scored")]
    NotScored,
}

impl DispatchError {
    /// Returns `true` if sending the same message again could not succeed
    /// without a configuration change.
    pub fn is_permanent(&self) -> bool {
        !matches!(self, DispatchError::Connection(_))
    }
}
