//! Integration tests for install / migrate / uninstall over a sled store

use super::test_utils::sled_service;
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;
use vitrine::lifecycle::{after_install, after_migrate, after_uninstall, LifecycleOutcome};
use vitrine::schema::{FieldValue, SCHEMA_VERSION};
use vitrine::store::{SettingsRecord, SettingsStore, SledSettingsStore};
use vitrine::theme::{default_config, ThemeService};

#[test]
fn test_install_creates_default_record_once() {
    let dir = TempDir::new().unwrap();
    let service = sled_service(&dir);
    assert_eq!(after_install(&service), LifecycleOutcome::Created);
    assert_eq!(after_install(&service), LifecycleOutcome::Unchanged);

    let record = service.store().load().unwrap().unwrap();
    assert_eq!(record.schema_version, SCHEMA_VERSION);
    assert_eq!(service.current(), default_config());
}

#[test]
fn test_migrate_upgrades_old_record() {
    let dir = TempDir::new().unwrap();
    let store = SledSettingsStore::new(dir.path()).unwrap();
    store.install_schema().unwrap();

    let mut values = BTreeMap::new();
    values.insert("navbar_blur".to_string(), FieldValue::Int(12));
    values.insert("gradient_end".to_string(), FieldValue::from("#abcdef"));
    values.insert("primary_color".to_string(), FieldValue::from("#123456"));
    values.insert("docstatus".to_string(), FieldValue::Int(0));
    let old = SettingsRecord {
        schema_version: 1,
        values,
        modified: None,
    };
    store.insert_if_absent(&old).unwrap();

    let service = ThemeService::new(Arc::new(store));
    let LifecycleOutcome::Migrated(report) = after_migrate(&service) else {
        panic!("expected migration");
    };
    assert_eq!(report.moved, vec!["gradient_end".to_string(), "navbar_blur".to_string()]);
    assert_eq!(report.dropped, vec!["docstatus".to_string()]);

    let config = service.current();
    assert_eq!(config.int("header_blur"), Some(12));
    assert_eq!(config.text("body_gradient_middle"), Some("#abcdef"));
    assert_eq!(config.text("gradient_end"), Some("#abcdef"));
    assert_eq!(config.text("primary_color"), Some("#123456"));

    assert_eq!(after_migrate(&service), LifecycleOutcome::Unchanged);
}

#[test]
fn test_uninstall_then_reads_fall_back() {
    let dir = TempDir::new().unwrap();
    let service = sled_service(&dir);
    after_install(&service);
    service
        .update_setting("font_family", &serde_json::json!("Inter"))
        .unwrap();
    assert_eq!(after_uninstall(&service), LifecycleOutcome::Removed);
    assert_eq!(service.current(), default_config());
    assert!(service.toggle_dark_mode().is_err());

    assert_eq!(after_install(&service), LifecycleOutcome::Created);
    assert_eq!(service.current().text("font_family"), Some("Cairo"));
}
