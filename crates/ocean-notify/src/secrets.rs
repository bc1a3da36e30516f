//! Secret resolution.
//!
//! The three mail secrets are looked up at notification time, not at
//! startup, so a session can be filled in before the secrets exist.

use std::collections::BTreeMap;

use ocean_core::error::DispatchError;
use ocean_core::traits::MailCredentials;

use crate::config::resolve_env_vars;

pub const SENDER_KEY: &str = "EMAIL";
pub const RECEIVER_KEY: &str = "RECEIVER";
pub const PASSWORD_KEY: &str = "EMAIL_PASSWORD";

/// Prefix for environment-variable overrides (`OCEAN_EMAIL`, ...).
pub const ENV_PREFIX: &str = "OCEAN_";

/// A source of named secret values.
pub trait SecretStore: Send + Sync {
    /// Look up `key`. Empty or whitespace-only values count as absent.
    fn get(&self, key: &str) -> Option<String>;
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Reads `OCEAN_<KEY>` from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSecrets;

impl SecretStore for EnvSecrets {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{ENV_PREFIX}{key}"))
            .ok()
            .filter(|v| present(v))
    }
}

/// The `[secrets]` table of the config file, with `${VAR}` references expanded.
#[derive(Clone, Default)]
pub struct TableSecrets {
    values: BTreeMap<String, String>,
}

impl TableSecrets {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl SecretStore for TableSecrets {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|raw| resolve_env_vars(raw))
            .filter(|v| present(v))
    }
}

/// Tries each store in order and returns the first hit.
#[derive(Default)]
pub struct LayeredSecrets {
    stores: Vec<Box<dyn SecretStore>>,
}

impl LayeredSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, store: impl SecretStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }

    /// Environment first, then the config table.
    pub fn standard(table: &BTreeMap<String, String>) -> Self {
        Self::new()
            .with(EnvSecrets)
            .with(TableSecrets::new(table.clone()))
    }
}

impl SecretStore for LayeredSecrets {
    fn get(&self, key: &str) -> Option<String> {
        self.stores.iter().find_map(|s| s.get(key))
    }
}

impl SecretStore for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).filter(|v| present(v)).cloned()
    }
}

/// Sender, recipient, and login resolved from a [`SecretStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSecrets {
    pub sender: String,
    pub receiver: String,
    pub credentials: MailCredentials,
}

/// Resolve all three mail secrets, reporting every missing key at once.
pub fn resolve_mail_secrets(store: &dyn SecretStore) -> Result<MailSecrets, DispatchError> {
    let sender = store.get(SENDER_KEY);
    let receiver = store.get(RECEIVER_KEY);
    let password = store.get(PASSWORD_KEY);

    match (sender, receiver, password) {
        (Some(sender), Some(receiver), Some(password)) => Ok(MailSecrets {
            credentials: MailCredentials {
                username: sender.clone(),
                password,
            },
            sender,
            receiver,
        }),
        (sender, receiver, password) => {
            let missing = [
                (SENDER_KEY, sender.is_none()),
                (RECEIVER_KEY, receiver.is_none()),
                (PASSWORD_KEY, password.is_none()),
            ]
            .into_iter()
            .filter(|(_, absent)| *absent)
            .map(|(key, _)| key.to_string())
            .collect();
            Err(DispatchError::MissingSecrets(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn resolves_all_three() {
        let store = table(&[
            ("EMAIL", "sender@example.com"),
            ("RECEIVER", "counsellor@example.com"),
            ("EMAIL_PASSWORD", "app-password"),
        ]);
        let secrets = resolve_mail_secrets(&store).unwrap();
        assert_eq!(secrets.sender, "sender@example.com");
        assert_eq!(secrets.receiver, "counsellor@example.com");
        assert_eq!(secrets.credentials.username, "sender@example.com");
        assert_eq!(secrets.credentials.password, "app-password");
    }

    #[test]
    fn reports_every_missing_key() {
        let store = table(&[("RECEIVER", "counsellor@example.com"), ("EMAIL", "")]);
        assert_eq!(
            resolve_mail_secrets(&store),
            Err(DispatchError::MissingSecrets(vec![
                "EMAIL".into(),
                "EMAIL_PASSWORD".into()
            ]))
        );
    }

    #[test]
    fn table_expands_env_references() {
        std::env::set_var("_OCEAN_SECRET_TEST", "from-env");
        let store = TableSecrets::new(table(&[("EMAIL_PASSWORD", "${_OCEAN_SECRET_TEST}")]));
        assert_eq!(store.get("EMAIL_PASSWORD").as_deref(), Some("from-env"));
        std::env::remove_var("_OCEAN_SECRET_TEST");

        let unset = TableSecrets::new(table(&[("EMAIL_PASSWORD", "${_OCEAN_SECRET_UNSET}")]));
        assert_eq!(unset.get("EMAIL_PASSWORD"), None);
    }

    #[test]
    fn layered_prefers_earlier_stores() {
        let store = LayeredSecrets::new()
            .with(TableSecrets::new(table(&[("EMAIL", "first@example.com")])))
            .with(TableSecrets::new(table(&[
                ("EMAIL", "second@example.com"),
                ("RECEIVER", "r@example.com"),
            ])));
        assert_eq!(store.get("EMAIL").as_deref(), Some("first@example.com"));
        assert_eq!(store.get("RECEIVER").as_deref(), Some("r@example.com"));
        assert_eq!(store.get("EMAIL_PASSWORD"), None);
    }

    #[test]
    fn standard_prefers_environment_over_config() {
        let config = table(&[
            ("EMAIL", "config-sender@example.com"),
            ("RECEIVER", "config-receiver@example.com"),
        ]);
        std::env::set_var("OCEAN_RECEIVER", "env-receiver@example.com");
        std::env::set_var("OCEAN_EMAIL", "   ");
        let store = LayeredSecrets::standard(&config);
        let receiver = store.get("RECEIVER");
        let sender = store.get("EMAIL");
        std::env::remove_var("OCEAN_RECEIVER");
        std::env::remove_var("OCEAN_EMAIL");

        assert_eq!(receiver.as_deref(), Some("env-receiver@example.com"));
        // A blank override does not shadow the config value.
        assert_eq!(sender.as_deref(), Some("config-sender@example.com"));
    }

    #[test]
    fn whitespace_counts_as_missing_everywhere() {
        std::env::set_var("OCEAN__BLANK_TEST", " \t");
        assert_eq!(EnvSecrets.get("_BLANK_TEST"), None);
        std::env::remove_var("OCEAN__BLANK_TEST");

        let config = table(&[("EMAIL_PASSWORD", "  ")]);
        assert_eq!(TableSecrets::new(config.clone()).get("EMAIL_PASSWORD"), None);
        assert_eq!(SecretStore::get(&config, "EMAIL_PASSWORD"), None);
    }

    #[test]
    fn env_store_reads_prefixed_vars() {
        std::env::set_var("OCEAN__ENV_STORE_TEST", "value");
        assert_eq!(EnvSecrets.get("_ENV_STORE_TEST").as_deref(), Some("value"));
        std::env::remove_var("OCEAN__ENV_STORE_TEST");
        assert_eq!(EnvSecrets.get("_ENV_STORE_TEST"), None);
    }
}
