pub mod error;

pub use error::*;

use cloudability_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APIKEY_ENV: &str = "CLOUDABILITY_APIKEY";
pub const BASE_URL_ENV: &str = "CLOUDABILITY_BASE_URL";
pub const CONFIG_PATH_ENV: &str = "CLOUDABILITY_CONFIG_PATH";

const CONFIG_FILE: &str = "config.yaml";

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
    pub verify: VerifyDefaults,
}

/// Defaults for the account verification poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyDefaults {
    pub retry_count: u32,
    pub retry_wait_secs: u64,
    /// Upper bound on the whole poll; unbounded when absent
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            verify: VerifyDefaults::default(),
        }
    }
}

impl Default for VerifyDefaults {
    fn default() -> Self {
        Self {
            retry_count: 20,
            retry_wait_secs: 5,
            timeout_secs: None,
        }
    }
}

/// Directory holding the user-level config file (`~/.config/cloudability`)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cloudability"))
}

/// Locate the config file
///
/// 1. `CLOUDABILITY_CONFIG_PATH` (must exist when set)
/// 2. `<config dir>/cloudability/config.yaml`
///
/// Having no file at all is fine; defaults and env vars still apply.
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Ok(get_config_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .filter(|path| path.exists()))
}

impl Config {
    /// Built-in defaults, overlaid by the config file, overlaid by env vars
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file()? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(APIKEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.verify.retry_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "verify.retry_count".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        Ok(())
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig::new(self.require_api_key()?)
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.request_timeout_secs)))
    }

    pub fn verify_timeout(&self) -> Option<Duration> {
        self.verify.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.cloudability.com/v3");
        assert_eq!(config.verify.retry_count, 20);
        assert_eq!(config.verify.retry_wait_secs, 5);
        assert_eq!(config.verify_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "api_key: from-file\nverify:\n  retry_wait_secs: 1\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.verify.retry_wait_secs, 1);
        assert_eq!(config.verify.retry_count, 20);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        fs::write(&path, "api_key: from-file\nbase_url: http://file.example/v3\n").unwrap();

        temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, Some(path.to_str().unwrap())),
                (APIKEY_ENV, Some("from-env")),
                (BASE_URL_ENV, None),
            ],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.api_key.as_deref(), Some("from-env"));
                assert_eq!(config.base_url, "http://file.example/v3");
            },
        );
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_path() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("/nonexistent/cloudability.yaml"), || {
            let result = Config::load();
            assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
        });
    }

    #[cfg(target_os = "linux")]
    #[test]
    #[serial]
    fn test_user_config_dir_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("cloudability");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yaml"), "verify:\n  retry_count: 3\n").unwrap();

        temp_env::with_vars(
            [
                ("XDG_CONFIG_HOME", Some(temp_dir.path().to_str().unwrap())),
                (CONFIG_PATH_ENV, None),
                (APIKEY_ENV, None),
                (BASE_URL_ENV, None),
            ],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.verify.retry_count, 3);
                assert!(matches!(
                    config.require_api_key(),
                    Err(ConfigError::MissingApiKey)
                ));
            },
        );
    }

    #[test]
    fn test_zero_retry_count_rejected() {
        let mut config = Config::default();
        config.verify.retry_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_client_config() {
        let config = Config {
            api_key: Some("secret".to_string()),
            request_timeout_secs: 10,
            ..Config::default()
        };
        let client = config.client_config().unwrap();
        assert_eq!(client.api_key, "secret");
        assert_eq!(client.timeout, Duration::from_secs(10));

        assert!(matches!(
            Config::default().client_config(),
            Err(ConfigError::MissingApiKey)
        ));
    }
}
