//! Configuration management
//!
//! `PortalConfig` is assembled from built-in defaults, an optional TOML file
//! and `BLISS__`-prefixed environment variables, in that order.

use crate::config_error;
use crate::error::BlissResult;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default namespace key of the durable session slot
pub const DEFAULT_SESSION_KEY: &str = "village_user";

/// Prefix for environment overrides, e.g. `BLISS__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "BLISS";

/// Top level portal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
        }
    }
}

/// Durable session slot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key the serialized identity is stored under (cookie name on the web)
    pub slot_key: String,
    /// Directory used by the CLI's file-backed slot
    pub storage_dir: String,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
    /// Cookie lifetime in days
    pub cookie_max_age_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SESSION_KEY.to_string(),
            storage_dir: "~/.bliss/session".to_string(),
            cookie_secure: false,
            cookie_max_age_days: 30,
        }
    }
}

/// Settings for the AI concierge collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub enabled: bool,
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "gemini-3-pro-preview".to_string(),
        }
    }
}

impl PortalConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> BlissResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error!(
                format!("Failed to read config file: {}", e),
                "config",
                "read_file",
                "Check if the config file exists and is readable",
                e
            )
        })?;

        let config: PortalConfig = toml::from_str(&content).map_err(|e| {
            config_error!(
                format!("Failed to parse config: {}", e),
                "config",
                "parse_toml",
                "Check TOML syntax in config file",
                e
            )
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> BlissResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            config_error!(
                format!("Failed to serialize config: {}", e),
                "config",
                "serialize_toml",
                "Report the configuration that failed to serialize",
                e
            )
        })?;

        std::fs::write(path, content).map_err(|e| {
            config_error!(
                format!("Failed to write config file: {}", e),
                "config",
                "write_file",
                "Check if the directory exists and is writable",
                e
            )
        })?;

        Ok(())
    }

    /// Layered load: defaults, then the optional file, then the environment
    pub fn load(path: Option<&Path>) -> BlissResult<Self> {
        let layered_error = |e: config::ConfigError| {
            config_error!(
                format!("Failed to assemble configuration: {}", e),
                "config",
                "load",
                "Check the config file and BLISS__* environment variables",
                e
            )
        };

        let defaults = config::Config::try_from(&PortalConfig::default()).map_err(layered_error)?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config: PortalConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(layered_error)?
            .try_deserialize()
            .map_err(layered_error)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> BlissResult<()> {
        if self.server.port == 0 {
            return Err(config_error!(
                "Server port must be greater than 0",
                "config",
                "validate",
                "Set server.port to a free TCP port"
            ));
        }

        let key = &self.session.slot_key;
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(config_error!(
                format!("Invalid session slot key: '{}'", key),
                "config",
                "validate",
                "Use letters, digits, '_' or '-' for session.slot_key"
            ));
        }

        if self.session.cookie_max_age_days <= 0 {
            return Err(config_error!(
                "Session cookie lifetime must be positive",
                "config",
                "validate",
                "Set session.cookie_max_age_days to at least 1"
            ));
        }

        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(config_error!(
                format!("Unknown log level: '{}'", self.logging.level),
                "config",
                "validate",
                "Use one of trace, debug, info, warn, error"
            ));
        }

        if self.assistant.enabled && self.assistant.model.trim().is_empty() {
            return Err(config_error!(
                "Assistant is enabled but no model is configured",
                "config",
                "validate",
                "Set assistant.model or disable the assistant"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlissError;

    #[test]
    fn test_default_config_is_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.slot_key, DEFAULT_SESSION_KEY);
        assert!(!config.assistant.enabled);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bliss.toml");

        let mut config = PortalConfig::default();
        config.server.port = 9090;
        config.session.cookie_secure = true;
        config.save_to_file(&path).unwrap();

        let loaded = PortalConfig::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 9090);
        assert!(loaded.session.cookie_secure);
    }

    #[test]
    fn test_layered_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bliss.toml");
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 3000\ndev_mode = true\n")
            .unwrap();

        let config = PortalConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        // untouched sections keep their defaults
        assert_eq!(config.session.slot_key, DEFAULT_SESSION_KEY);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = PortalConfig::from_file("/definitely/not/here.toml");
        match result {
            Err(error @ BlissError::Config { .. }) => {
                let context = error.context().unwrap();
                assert_eq!(context.operation.as_deref(), Some("read_file"));
                assert!(std::error::Error::source(&error).is_some());
            }
            other => panic!("Expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PortalConfig::default();
        config.server.port = 0;
        let error = config.validate().unwrap_err();
        assert_eq!(
            error.context().and_then(|c| c.operation.as_deref()),
            Some("validate")
        );

        let mut config = PortalConfig::default();
        config.session.slot_key = "village user;".to_string();
        assert!(config.validate().is_err());

        let mut config = PortalConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = PortalConfig::default();
        config.assistant.enabled = true;
        config.assistant.model = " ".to_string();
        assert!(config.validate().is_err());
    }
}
