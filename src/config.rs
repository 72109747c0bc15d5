//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the account API, without a trailing slash.
    pub api_base_url: String,
    /// Path of the local database holding the persisted user id.
    pub db_path: PathBuf,
    /// Directory for rolling log files. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://192.168.0.22:8081".to_string(),
            db_path: PathBuf::from("./data/onboarding.db"),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub const API_URL_VAR: &'static str = "FITNESS_ONBOARDING_API_URL";
    pub const DB_PATH_VAR: &'static str = "FITNESS_ONBOARDING_DB_PATH";
    pub const LOG_DIR_VAR: &'static str = "FITNESS_ONBOARDING_LOG_DIR";

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = match lookup(Self::API_URL_VAR) {
            Some(raw) => normalize_base_url(&raw)?,
            None => defaults.api_base_url,
        };

        let db_path = lookup(Self::DB_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let log_dir = lookup(Self::LOG_DIR_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base_url,
            db_path,
            log_dir,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            key: ClientConfig::API_URL_VAR.to_string(),
            message: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://192.168.0.22:8081");
        assert_eq!(config.db_path, PathBuf::from("./data/onboarding.db"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::from_lookup(lookup(&[(
            ClientConfig::API_URL_VAR,
            "https://api.example.com/",
        )]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn rejects_non_http_url() {
        let err = ClientConfig::from_lookup(lookup(&[(ClientConfig::API_URL_VAR, "ftp://x")]))
            .unwrap_err();
        assert!(err.to_string().contains(ClientConfig::API_URL_VAR));
    }

    #[test]
    fn reads_paths() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ClientConfig::DB_PATH_VAR, "/tmp/onboard.db"),
            (ClientConfig::LOG_DIR_VAR, "/tmp/logs"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/onboard.db"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }
}
