//! Theme service: the only path through which theme settings are read or
//! written.

use crate::error::{ApiError, StorageError};
use crate::schema::{FieldValue, ADVANCED_FIELDS};
use crate::store::SettingsStore;
use crate::theme::validate::{validate, validate_field, ValidatedUpdates};
use crate::theme::{default_config, resolve, ThemeConfig};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Downstream rendering cache hook, invoked after every successful write.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self);
}

/// Invalidator for hosts that render without a cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate(&self) {
        debug!("Render cache invalidation requested (no cache configured)");
    }
}

/// Read/validate/apply over a settings store.
#[derive(Clone)]
pub struct ThemeService {
    store: Arc<dyn SettingsStore>,
    cache: Arc<dyn CacheInvalidator>,
}

impl ThemeService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_cache(store, Arc::new(NoopInvalidator))
    }

    pub fn with_cache(store: Arc<dyn SettingsStore>, cache: Arc<dyn CacheInvalidator>) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn CacheInvalidator> {
        &self.cache
    }

    /// Resolve the current configuration. Never fails: any store failure
    /// yields the default configuration.
    pub fn current(&self) -> ThemeConfig {
        match self.store.load() {
            Ok(record) => resolve(record.as_ref()),
            Err(StorageError::SchemaMissing) => {
                debug!("Settings schema not installed, serving defaults");
                default_config()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load theme settings, serving defaults");
                default_config()
            }
        }
    }

    /// Write validated fields in one atomic store update and return the
    /// freshly resolved configuration.
    pub fn apply(&self, updates: &ValidatedUpdates) -> Result<ThemeConfig, ApiError> {
        let record = self.store.update(&|record| {
            for (field, value) in updates.iter() {
                record.set(field, value.clone());
            }
        })?;
        self.cache.invalidate();
        info!(fields = updates.len(), "Theme settings updated");
        Ok(resolve(Some(&record)))
    }

    /// Validate a bulk payload and apply it.
    pub fn save(&self, candidate: &Map<String, Value>) -> Result<ThemeConfig, ApiError> {
        let updates = validate(candidate)?;
        self.apply(&updates)
    }

    /// Validate and write a single field. Returns the canonical field name,
    /// the stored value and the resolved configuration.
    pub fn update_setting(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<(&'static str, FieldValue, ThemeConfig), ApiError> {
        let (spec, value) = validate_field(field, value)?;
        let written = value.clone();
        let record = self.store.update(&|record| record.set(spec.name, written.clone()))?;
        self.cache.invalidate();
        info!(field = spec.name, "Theme setting updated");
        Ok((spec.name, value, resolve(Some(&record))))
    }

    /// Overwrite every field with its default and clear the CSS/JS overrides.
    pub fn reset(&self) -> Result<ThemeConfig, ApiError> {
        let defaults = ValidatedUpdates::defaults();
        let record = self.store.update(&|record| {
            record.values.clear();
            for (field, value) in defaults.iter() {
                record.set(field, value.clone());
            }
            for field in ADVANCED_FIELDS {
                record.set(field, FieldValue::Text(String::new()));
            }
        })?;
        self.cache.invalidate();
        info!("Theme settings reset to defaults");
        Ok(resolve(Some(&record)))
    }

    /// Flip dark mode and return the new state.
    pub fn toggle_dark_mode(&self) -> Result<bool, ApiError> {
        let record = self.store.update(&|record| {
            let enabled = record
                .get("dark_mode")
                .and_then(FieldValue::as_int)
                .map(|v| v != 0)
                .unwrap_or(false);
            record.set("dark_mode", FieldValue::Int(i64::from(!enabled)));
        })?;
        self.cache.invalidate();
        let enabled = resolve(Some(&record)).flag("dark_mode");
        info!(dark_mode = enabled, "Dark mode toggled");
        Ok(enabled)
    }
}
