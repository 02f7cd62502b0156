//! Configuration management for studylog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default application directory name.
const APP_DIR_NAME: &str = "studylog";

/// Default directory holding the collection files.
const DATA_DIR_NAME: &str = "data";

/// Default address the web server listens on.
const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `STUDYLOG_`, sections split on `__`)
/// 2. TOML config file at `~/.config/studylog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Web server configuration.
    pub server: ServerConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `projects.json`, `subjects.json` and `observations.json`.
    /// Defaults to `~/.local/share/studylog/data`
    pub data_dir: Option<PathBuf>,
    /// Write collections to a temporary file and rename it into place.
    /// When disabled, collection files are truncated and rewritten directly.
    pub atomic_writes: bool,
}

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Will be resolved to default at runtime
            atomic_writes: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// Values are not validated here, so command-line overrides can still be
    /// applied; call [`Config::validate`] once they are.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("STUDYLOG_").split("__"));

        Ok(figment.extract()?)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if let Some(dir) = &self.storage.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "data_dir cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Parse the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a valid socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|_| Error::ConfigValidation {
                message: format!("invalid bind address: {}", self.server.bind),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_dir.is_none());
        assert!(config.storage.atomic_writes);
        assert_eq!(config.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_bind() {
        let mut config = Config::default();
        config.server.bind = "not an address".to_string();

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid bind address"));
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_dir"));
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::default();
        let addr = config.bind_addr().unwrap();
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_data_dir_default() {
        let config = Config::default();
        let path = config.data_dir();

        assert!(path.to_string_lossy().contains("studylog"));
        assert!(path.ends_with("data"));
    }

    #[test]
    fn test_data_dir_custom() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/custom/data"));

        assert_eq!(config.data_dir(), PathBuf::from("/custom/data"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("studylog"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    // Loading tests run inside a figment Jail so environment overrides set by
    // one test never leak into another.

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("defaults load");
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [storage]
                data_dir = "/srv/studylog"
                atomic_writes = false

                [server]
                bind = "0.0.0.0:8080"
                "#,
            )?;

            let config = Config::load_from(Some(jail.directory().join("config.toml")))
                .expect("file loads");
            assert_eq!(config.data_dir(), PathBuf::from("/srv/studylog"));
            assert!(!config.storage.atomic_writes);
            assert_eq!(config.bind_addr().unwrap().port(), 8080);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [storage]
                data_dir = "/srv/studylog"
                "#,
            )?;
            jail.set_env("STUDYLOG_STORAGE__DATA_DIR", "/var/lib/studylog");
            jail.set_env("STUDYLOG_SERVER__BIND", "127.0.0.1:7000");

            let config = Config::load_from(Some(jail.directory().join("config.toml")))
                .expect("env loads");
            assert_eq!(config.data_dir(), PathBuf::from("/var/lib/studylog"));
            assert_eq!(config.bind_addr().unwrap().port(), 7000);
            Ok(())
        });
    }

    #[test]
    fn test_bad_bind_in_file_fails_validation() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[server]\nbind = \"nowhere\"\n")?;

            let config = Config::load_from(Some(jail.directory().join("config.toml")))
                .expect("file loads");
            assert_eq!(config.server.bind, "nowhere");
            assert!(matches!(
                config.validate(),
                Err(Error::ConfigValidation { .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_bind_override_rescues_bad_file_value() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[server]\nbind = \"nowhere\"\n")?;

            let mut config = Config::load_from(Some(jail.directory().join("config.toml")))
                .expect("file loads");
            config.server.bind = "127.0.0.1:5000".to_string();
            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[server\nbind = ")?;

            let result = Config::load_from(Some(jail.directory().join("config.toml")));
            assert!(matches!(result, Err(Error::ConfigLoad(_))));
            Ok(())
        });
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"data_dir": "/tmp/data"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.data_dir, Some(PathBuf::from("/tmp/data")));
        assert!(storage.atomic_writes);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
