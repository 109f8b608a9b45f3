//! In-process settings store, for embedding hosts and tests.

use crate::error::StorageError;
use crate::store::{SettingsRecord, SettingsStore};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    schema_installed: bool,
    record: Option<SettingsRecord>,
}

/// `SettingsStore` backed by a lock-guarded value.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    state: RwLock<MemoryState>,
}

impl MemorySettingsStore {
    /// Store with no schema installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the schema installed and no record.
    pub fn installed() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                schema_installed: true,
                record: None,
            }),
        }
    }

    /// Store with the schema installed holding `record`.
    pub fn with_record(record: SettingsRecord) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                schema_installed: true,
                record: Some(record),
            }),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn schema_installed(&self) -> Result<bool, StorageError> {
        Ok(self.state.read().schema_installed)
    }

    fn install_schema(&self) -> Result<(), StorageError> {
        self.state.write().schema_installed = true;
        Ok(())
    }

    fn drop_schema(&self) -> Result<(), StorageError> {
        let mut state = self.state.write();
        state.schema_installed = false;
        state.record = None;
        Ok(())
    }

    fn load(&self) -> Result<Option<SettingsRecord>, StorageError> {
        let state = self.state.read();
        if !state.schema_installed {
            return Err(StorageError::SchemaMissing);
        }
        Ok(state.record.clone())
    }

    fn insert_if_absent(&self, record: &SettingsRecord) -> Result<bool, StorageError> {
        let mut state = self.state.write();
        if !state.schema_installed {
            return Err(StorageError::SchemaMissing);
        }
        if state.record.is_some() {
            return Ok(false);
        }
        state.record = Some(record.clone());
        Ok(true)
    }

    fn update(
        &self,
        mutate: &dyn Fn(&mut SettingsRecord),
    ) -> Result<SettingsRecord, StorageError> {
        let mut state = self.state.write();
        if !state.schema_installed {
            return Err(StorageError::SchemaMissing);
        }
        let mut record = state.record.clone().unwrap_or_else(SettingsRecord::new);
        mutate(&mut record);
        record.touch();
        state.record = Some(record.clone());
        Ok(record)
    }
}
