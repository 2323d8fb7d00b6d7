use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, ENV_API_URL, ENV_AUTH_TOKEN, FILTER_DEBOUNCE_MS, REQUEST_TIMEOUT_SECS,
};
use crate::error::{CoreError, Result};

/// Core configuration, loadable from a camelCase JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    pub api_base_url: String,

    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    pub filter_debounce_ms: u64,

    pub request_timeout_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            filter_debounce_ms: FILTER_DEBOUNCE_MS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl CoreConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&content).map_err(|e| CoreError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// `<config_dir>/projdesk/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("projdesk").join("config.json"))
    }

    /// Load from `path`, else from the default location if it exists, else defaults.
    /// Environment overrides are applied last.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Let `PROJDESK_API_URL` / `PROJDESK_TOKEN` override file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_AUTH_TOKEN).ok(),
        );
    }

    fn apply_overrides(&mut self, api_url: Option<String>, token: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.auth_token = Some(token);
        }
    }

    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{"apiBaseUrl": "https://pm.example.com/api"}"#;
        let config: CoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_base_url, "https://pm.example.com/api");
        assert!(config.auth_token.is_none());
        assert_eq!(config.filter_debounce(), Duration::from_millis(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"apiBaseUrl": "http://127.0.0.1:9000", "authToken": "tok", "filterDebounceMs": 50}}"#
        )
        .unwrap();

        let config = CoreConfig::load(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.auth_token.as_deref(), Some("tok"));
        assert_eq!(config.filter_debounce_ms, 50);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = CoreConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let mut config = CoreConfig::new("http://a");
        config.apply_overrides(Some("  ".to_string()), Some("secret".to_string()));
        assert_eq!(config.api_base_url, "http://a");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));

        config.apply_overrides(Some("http://b".to_string()), None);
        assert_eq!(config.api_base_url, "http://b");
    }
}
