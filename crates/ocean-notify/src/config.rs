//! Configuration loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ocean_core::report::DEFAULT_REPORT_TITLE;

/// Outbound relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay host, reached with STARTTLS.
    #[serde(default = "default_host")]
    pub host: String,
    /// Submission port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Give up on the relay after this many seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_port() -> u16 {
    587
}
fn default_timeout() -> u64 {
    30
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Report wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Subject prefix; the respondent name is appended.
    #[serde(default = "default_title")]
    pub title: String,
    /// Shown to the respondent once the results are delivered.
    #[serde(default = "default_confirmation")]
    pub confirmation: String,
}

fn default_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}
fn default_confirmation() -> String {
    "Your results have been securely sent to the assessment team.\n\
     Please contact them to receive your personalized report."
        .to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            confirmation: default_confirmation(),
        }
    }
}

/// Top-level ocean configuration.
///
/// Note: Custom Debug impl masks secret values to prevent accidental exposure in logs.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct OceanConfig {
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Raw secret values keyed by name (`EMAIL`, `RECEIVER`, `EMAIL_PASSWORD`).
    /// Resolved lazily at notification time; see [`crate::secrets`].
    #[serde(default)]
    pub secrets: BTreeMap<String, String>,
}

impl std::fmt::Debug for OceanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked: Vec<&str> = self.secrets.keys().map(String::as_str).collect();
        f.debug_struct("OceanConfig")
            .field("smtp", &self.smtp)
            .field("report", &self.report)
            .field("secrets", &masked)
            .finish()
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Unset variables resolve to the empty string.
pub fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `ocean.toml` in the current directory
/// 2. `~/.config/ocean/config.toml`
///
/// Falls back to defaults when neither exists.
pub fn load_config() -> Result<OceanConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<OceanConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("ocean.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<OceanConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => OceanConfig::default(),
    };

    anyhow::ensure!(config.smtp.port != 0, "smtp.port must be non-zero");
    anyhow::ensure!(!config.smtp.host.trim().is_empty(), "smtp.host must not be empty");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("ocean"))
}
