//! Settings Store
//!
//! Owns the singleton settings record. Every read and write of theme settings
//! goes through a `SettingsStore`; nothing looks the record up ambiently.

pub mod memory;
pub mod persistence;

pub use memory::MemorySettingsStore;
pub use persistence::SledSettingsStore;

use crate::error::StorageError;
use crate::schema::{self, FieldValue, SCHEMA_VERSION};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The stored singleton: a sparse map of field name to value.
///
/// Fields absent from the map resolve to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
    /// RFC 3339 timestamp of the last write
    #[serde(default)]
    pub modified: Option<String>,
}

impl SettingsRecord {
    /// Empty record at the current schema version.
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            values: BTreeMap::new(),
            modified: None,
        }
    }

    /// Record holding every field's default, as written at install time.
    pub fn with_defaults() -> Self {
        let mut record = Self::new();
        for spec in schema::FIELDS {
            record
                .values
                .insert(spec.name.to_string(), spec.default_value());
        }
        record.touch();
        record
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_string(), value);
    }

    /// Stamp the record with the current time.
    pub fn touch(&mut self) {
        self.modified = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    }
}

/// Storage interface for the singleton settings record.
///
/// `load` distinguishes "schema not installed" (`Err(SchemaMissing)`) from
/// "schema installed, no row yet" (`Ok(None)`).
pub trait SettingsStore: Send + Sync {
    fn schema_installed(&self) -> Result<bool, StorageError>;

    /// Register the settings schema. Idempotent.
    fn install_schema(&self) -> Result<(), StorageError>;

    /// Remove the schema together with the record. Idempotent.
    fn drop_schema(&self) -> Result<(), StorageError>;

    fn load(&self) -> Result<Option<SettingsRecord>, StorageError>;

    /// Insert `record` unless one already exists. Returns true when inserted.
    fn insert_if_absent(&self, record: &SettingsRecord) -> Result<bool, StorageError>;

    /// Atomically read, mutate and persist the record, creating an empty one
    /// if none exists yet. `mutate` may run more than once under contention
    /// and must only depend on the record it is handed.
    fn update(
        &self,
        mutate: &dyn Fn(&mut SettingsRecord),
    ) -> Result<SettingsRecord, StorageError>;
}
