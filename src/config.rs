//! Configuration System
//!
//! Hierarchical configuration: built-in defaults, the global config file, the
//! workspace config files, then `VITRINE_*` environment variables. Tests included.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitrineConfig {
    /// Storage paths
    #[serde(default)]
    pub storage: StorageConfig,

    /// Endpoint limits
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the settings database lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Sled database directory; relative paths hang off the workspace root
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".vitrine/store")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl StorageConfig {
    /// Absolute store path for the given workspace.
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            workspace_root.join(&self.store_path)
        }
    }
}

/// Endpoint limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Max characters of an unexpected error surfaced to callers and logs
    #[serde(default = "default_error_message_limit")]
    pub error_message_limit: usize,

    /// Same, for KPI source failures
    #[serde(default = "default_kpi_error_message_limit")]
    pub kpi_error_message_limit: usize,

    /// Max favorites returned per user
    #[serde(default = "default_favorites_limit")]
    pub favorites_limit: usize,
}

fn default_error_message_limit() -> usize {
    100
}

fn default_kpi_error_message_limit() -> usize {
    200
}

fn default_favorites_limit() -> usize {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            error_message_limit: default_error_message_limit(),
            kpi_error_message_limit: default_kpi_error_message_limit(),
            favorites_limit: default_favorites_limit(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Storage(String),
    Api(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Api(msg) => write!(f, "Api: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl VitrineConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("error_message_limit", self.api.error_message_limit),
            ("kpi_error_message_limit", self.api.kpi_error_message_limit),
            ("favorites_limit", self.api.favorites_limit),
        ] {
            if value == 0 {
                errors.push(ValidationError::Api(format!("{} must be positive", name)));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads `VitrineConfig` from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `config/config.toml`, `config/{VITRINE_ENV}.toml`, `VITRINE_*` env vars.
    pub fn load(workspace_root: &Path) -> Result<VitrineConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder.add_source(env_source()).build()?;
        Self::finish(config)
    }

    /// Load configuration from one explicit file (plus env overrides).
    pub fn load_from_file(path: &Path) -> Result<VitrineConfig, ApiError> {
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()))
            .add_source(env_source())
            .build()?;
        Self::finish(config)
    }

    fn finish(config: Config) -> Result<VitrineConfig, ApiError> {
        let parsed: VitrineConfig = config.try_deserialize()?;
        parsed.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(parsed)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("VITRINE")
        .prefix_separator("_")
        .separator("__")
}
