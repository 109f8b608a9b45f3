//! Persistence layer for the settings record

use crate::error::StorageError;
use crate::schema::SCHEMA_VERSION;
use crate::store::{SettingsRecord, SettingsStore};
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use std::cell::RefCell;
use std::io;
use std::path::Path;

const TREE_SCHEMA: &str = "vitrine_schema";
const TREE_SETTINGS: &str = "theme_settings";
const SCHEMA_KEY: &[u8] = b"theme_settings";
const SINGLETON_KEY: &[u8] = b"singleton";

#[derive(Debug, Serialize, Deserialize)]
struct SchemaMarker {
    version: u32,
    installed_at: String,
}

/// Sled-based implementation of SettingsStore
#[derive(Clone)]
pub struct SledSettingsStore {
    db: Db,
    schema: Tree,
    settings: Tree,
}

impl SledSettingsStore {
    /// Open (or create) a sled database at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| {
            StorageError::IoError(io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            ))
        })?;
        Self::from_db(db)
    }

    /// Share an already open database (favorites live in the same db).
    pub fn from_db(db: Db) -> Result<Self, StorageError> {
        let schema = db.open_tree(TREE_SCHEMA).map_err(to_storage_io)?;
        let settings = db.open_tree(TREE_SETTINGS).map_err(to_storage_io)?;
        Ok(Self {
            db,
            schema,
            settings,
        })
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush().map_err(to_storage_io)?;
        Ok(())
    }

    fn ensure_schema(&self) -> Result<(), StorageError> {
        if self.schema_installed()? {
            Ok(())
        } else {
            Err(StorageError::SchemaMissing)
        }
    }
}

impl SettingsStore for SledSettingsStore {
    fn schema_installed(&self) -> Result<bool, StorageError> {
        self.schema.contains_key(SCHEMA_KEY).map_err(to_storage_io)
    }

    fn install_schema(&self) -> Result<(), StorageError> {
        if self.schema_installed()? {
            return Ok(());
        }
        let marker = SchemaMarker {
            version: SCHEMA_VERSION,
            installed_at: chrono::Utc::now().to_rfc3339(),
        };
        let value = serde_json::to_vec(&marker).map_err(to_storage_data)?;
        self.schema
            .insert(SCHEMA_KEY, value)
            .map_err(to_storage_io)?;
        Ok(())
    }

    fn drop_schema(&self) -> Result<(), StorageError> {
        self.settings.clear().map_err(to_storage_io)?;
        self.schema.remove(SCHEMA_KEY).map_err(to_storage_io)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SettingsRecord>, StorageError> {
        self.ensure_schema()?;
        let Some(raw) = self.settings.get(SINGLETON_KEY).map_err(to_storage_io)? else {
            return Ok(None);
        };
        let record = serde_json::from_slice(&raw).map_err(to_storage_data)?;
        Ok(Some(record))
    }

    fn insert_if_absent(&self, record: &SettingsRecord) -> Result<bool, StorageError> {
        self.ensure_schema()?;
        let value = serde_json::to_vec(record).map_err(to_storage_data)?;
        let swapped = self
            .settings
            .compare_and_swap(SINGLETON_KEY, None as Option<&[u8]>, Some(value))
            .map_err(to_storage_io)?;
        Ok(swapped.is_ok())
    }

    fn update(
        &self,
        mutate: &dyn Fn(&mut SettingsRecord),
    ) -> Result<SettingsRecord, StorageError> {
        self.ensure_schema()?;

        // sled retries the closure on contention; keep the last failure only.
        let failure: RefCell<Option<StorageError>> = RefCell::new(None);
        let updated = self
            .settings
            .update_and_fetch(SINGLETON_KEY, |old| {
                *failure.borrow_mut() = None;
                let mut record = match old {
                    Some(raw) => match serde_json::from_slice::<SettingsRecord>(raw) {
                        Ok(record) => record,
                        Err(e) => {
                            *failure.borrow_mut() = Some(to_storage_data(e));
                            return Some(raw.to_vec());
                        }
                    },
                    None => SettingsRecord::new(),
                };
                mutate(&mut record);
                record.touch();
                match serde_json::to_vec(&record) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        *failure.borrow_mut() = Some(to_storage_data(e));
                        old.map(|raw| raw.to_vec())
                    }
                }
            })
            .map_err(to_storage_io)?;

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        let raw = updated.ok_or(StorageError::RecordMissing)?;
        serde_json::from_slice(&raw).map_err(to_storage_data)
    }
}

pub(crate) fn to_storage_io(err: sled::Error) -> StorageError {
    StorageError::IoError(io::Error::new(io::ErrorKind::Other, err.to_string()))
}

pub(crate) fn to_storage_data(err: serde_json::Error) -> StorageError {
    StorageError::Corrupt(err.to_string())
}
