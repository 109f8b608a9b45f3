//! Install / migrate / uninstall hooks
//!
//! Each hook is idempotent and best-effort: failures are logged and reported
//! in the returned outcome, never propagated.

use crate::error::StorageError;
use crate::schema::{self, SCHEMA_VERSION};
use crate::store::SettingsRecord;
use crate::theme::ThemeService;
use serde::Serialize;
use tracing::{error, info};

/// What a hook did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LifecycleOutcome {
    /// Default record written
    Created,
    /// Record already present and current
    Unchanged,
    /// Existing record upgraded to the current schema
    Migrated(MigrationReport),
    /// Schema and record removed
    Removed,
    /// Hook failed; the message has already been logged
    Failed { message: String },
}

impl LifecycleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, LifecycleOutcome::Failed { .. })
    }
}

/// Changes made while upgrading a stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub from_version: u32,
    /// Legacy keys whose value moved to the replacement field
    pub moved: Vec<String>,
    /// Keys with no place in the current schema
    pub dropped: Vec<String>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.from_version == SCHEMA_VERSION && self.moved.is_empty() && self.dropped.is_empty()
    }
}

/// Bring a stored record up to the current schema.
///
/// Legacy alias keys move to their replacement unless it is already set;
/// unknown keys are dropped.
pub fn migrate_record(record: &mut SettingsRecord) -> MigrationReport {
    let mut report = MigrationReport {
        from_version: record.schema_version,
        ..MigrationReport::default()
    };

    let keys: Vec<String> = record.values.keys().cloned().collect();
    for key in keys {
        if schema::field(&key).is_some() {
            continue;
        }
        let Some(value) = record.values.remove(&key) else {
            continue;
        };
        match schema::alias_target(&key) {
            Some(target) => {
                if !record.values.contains_key(target) {
                    record.set(target, value);
                    report.moved.push(key);
                } else {
                    report.dropped.push(key);
                }
            }
            None => report.dropped.push(key),
        }
    }
    record.schema_version = SCHEMA_VERSION;
    report
}

/// Register the schema and write the default record if none exists.
pub fn after_install(service: &ThemeService) -> LifecycleOutcome {
    let outcome = create_default_settings(service);
    match &outcome {
        LifecycleOutcome::Created => info!("Theme settings installed with defaults"),
        LifecycleOutcome::Unchanged => info!("Theme settings already installed"),
        _ => {}
    }
    outcome
}

/// Re-run creation and upgrade whatever record is already stored.
pub fn after_migrate(service: &ThemeService) -> LifecycleOutcome {
    let store = service.store();
    let current = match store.install_schema().and_then(|_| store.load()) {
        Ok(record) => record,
        Err(e) => return failed("after_migrate", e),
    };

    let Some(mut record) = current else {
        return create_default_settings(service);
    };

    let report = migrate_record(&mut record);
    if report.is_noop() {
        service.cache().invalidate();
        return LifecycleOutcome::Unchanged;
    }
    match store.update(&|stored| {
        migrate_record(stored);
    }) {
        Ok(_) => {
            service.cache().invalidate();
            info!(
                from_version = report.from_version,
                to_version = SCHEMA_VERSION,
                moved = report.moved.len(),
                dropped = report.dropped.len(),
                "Theme settings migrated"
            );
            LifecycleOutcome::Migrated(report)
        }
        Err(e) => failed("after_migrate", e),
    }
}

/// Drop the schema together with the stored record.
pub fn after_uninstall(service: &ThemeService) -> LifecycleOutcome {
    match service.store().drop_schema() {
        Ok(()) => {
            service.cache().invalidate();
            info!("Theme settings removed");
            LifecycleOutcome::Removed
        }
        Err(e) => failed("after_uninstall", e),
    }
}

fn create_default_settings(service: &ThemeService) -> LifecycleOutcome {
    let store = service.store();
    let created = store
        .install_schema()
        .and_then(|_| store.insert_if_absent(&SettingsRecord::with_defaults()));
    match created {
        Ok(true) => {
            service.cache().invalidate();
            LifecycleOutcome::Created
        }
        Ok(false) => LifecycleOutcome::Unchanged,
        Err(e) => failed("create_default_settings", e),
    }
}

fn failed(hook: &str, err: StorageError) -> LifecycleOutcome {
    error!(hook, error = %err, "Lifecycle hook failed");
    LifecycleOutcome::Failed {
        message: err.to_string(),
    }
}
