//! Error types for the Vitrine theme settings service.

use thiserror::Error;

/// Field-level validation failures.
///
/// These are caller mistakes, reported back verbatim and never treated as
/// system faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field not permitted: {0}")]
    FieldNotPermitted(String),

    #[error("{label} must be between {min} and {max} ({field}: {min}–{max})")]
    OutOfRange {
        field: String,
        label: String,
        min: i64,
        max: i64,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Conflicting values for {alias} and {field}")]
    ConflictingAlias { alias: String, field: String },

    #[error("Invalid settings payload: {0}")]
    InvalidPayload(String),
}

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Settings schema is not installed")]
    SchemaMissing,

    #[error("Settings record not found")]
    RecordMissing,

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// True for the "nothing configured yet" family of failures.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::SchemaMissing | StorageError::RecordMissing)
    }
}

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Not permitted: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("KPI source error: {0}")]
    KpiSource(String),

    /// An endpoint answered `success: false`; carries its message.
    #[error("{0}")]
    Rejected(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
