//! ocean-notify — Results delivery for ocean.
//!
//! Loads configuration, resolves the mail secrets at send time, and delivers
//! the results report through an SMTP relay (or a mock in tests).

pub mod config;
pub mod dispatcher;
pub mod mock;
pub mod secrets;
pub mod smtp;

pub use config::{load_config, load_config_from, OceanConfig};
pub use dispatcher::{DispatchOutcome, Dispatcher, ReportPreview};
pub use mock::MockMailer;
pub use smtp::SmtpMailer;
