//! Integration tests for the theme endpoints over a sled store

use super::test_utils::{installed_api, sled_service};
use serde_json::json;
use tempfile::TempDir;
use vitrine::api::{ApiResponse, BootInfo, Caller, ThemeApi, BOOT_KEY};
use vitrine::schema::{FieldValue, SCHEMA_VERSION};
use vitrine::theme::default_config;

fn admin() -> Caller {
    Caller::user("Administrator")
}

#[test]
fn test_reads_degrade_without_schema() {
    let dir = TempDir::new().unwrap();
    let api = ThemeApi::new(sled_service(&dir));
    assert_eq!(api.get_theme_settings(&admin()), default_config());
    assert_eq!(
        api.save_theme_settings(&admin(), &json!({ "dark_mode": 1 })),
        ApiResponse::failed("Settings not configured")
    );
}

#[test]
fn test_save_accepts_object_and_string_payloads() {
    let dir = TempDir::new().unwrap();
    let api = installed_api(&dir);
    assert_eq!(
        api.save_theme_settings(&admin(), &json!({ "sidebar_width": 260, "dark_mode": true })),
        ApiResponse::ok("Settings saved successfully")
    );
    assert_eq!(
        api.save_theme_settings(&admin(), &json!("{\"glass_opacity\": 40}")),
        ApiResponse::ok("Settings saved successfully")
    );
    let config = api.get_theme_settings(&admin());
    assert!(config.flag("dark_mode"));
    assert_eq!(config.int("glass_opacity"), Some(40));
}

#[test]
fn test_out_of_range_save_is_rejected_and_store_untouched() {
    let dir = TempDir::new().unwrap();
    let api = installed_api(&dir);
    let before = api.get_theme_settings(&admin());
    let resp = api.save_theme_settings(&admin(), &json!({ "glass_blur": 150 }));
    assert!(!resp.success);
    let message = resp.message.unwrap();
    assert!(message.contains("glass_blur"), "{}", message);
    assert!(message.contains("0–100"), "{}", message);
    assert_eq!(api.get_theme_settings(&admin()), before);
}

#[test]
fn test_unknown_field_is_not_permitted() {
    let dir = TempDir::new().unwrap();
    let api = installed_api(&dir);
    let resp = api.save_theme_settings(&admin(), &json!({ "owner": "x", "dark_mode": 1 }));
    assert_eq!(resp, ApiResponse::failed("Field not permitted: owner"));
    let resp = api.update_setting(&admin(), "modified", &json!("now"));
    assert!(!resp.success);
}

#[test]
fn test_legacy_alias_write_redirects() {
    let dir = TempDir::new().unwrap();
    let api = installed_api(&dir);
    let resp = api.update_setting(&admin(), "navbar_blur", &json!(40));
    assert!(resp.success);
    assert_eq!(resp.field.as_deref(), Some("header_blur"));
    assert_eq!(resp.value, Some(FieldValue::Int(40)));
    let config = api.get_theme_settings(&admin());
    assert_eq!(config.int("header_blur"), Some(40));
    assert_eq!(config.int("navbar_blur"), Some(40));
}

#[test]
fn test_reset_and_toggle() {
    let dir = TempDir::new().unwrap();
    let api = installed_api(&dir);
    api.save_theme_settings(&admin(), &json!({ "custom_css": "a{}", "font_family": "Inter" }));

    let resp = api.toggle_dark_mode(&admin());
    assert_eq!(resp.dark_mode, Some(1));
    assert_eq!(resp.message.as_deref(), Some("Dark mode enabled"));

    assert_eq!(api.reset_theme(&admin()), ApiResponse::ok("Theme reset to defaults"));
    let config = api.get_theme_settings(&admin());
    assert_eq!(config, default_config());
    assert_eq!(config.text("custom_css"), Some(""));
}

#[test]
fn test_guest_reads_withhold_overrides() {
    let dir = TempDir::new().unwrap();
    let api = installed_api(&dir);
    api.save_theme_settings(&admin(), &json!({ "custom_js": "console.log(1)" }));
    assert_eq!(
        api.get_theme_settings(&admin()).text("custom_js"),
        Some("console.log(1)")
    );
    assert_eq!(api.get_theme_settings(&Caller::Guest).text("custom_js"), Some(""));
}

#[test]
fn test_boot_info_carries_guest_theme() {
    let dir = TempDir::new().unwrap();
    let api = installed_api(&dir);
    api.save_theme_settings(
        &admin(),
        &json!({ "color_theme": "Bento Grids", "custom_css": "secret{}" }),
    );
    let mut boot = BootInfo::default();
    boot.entries.insert("user".to_string(), json!("Administrator"));
    api.extend_boot_info(&mut boot);

    let entry = &boot.entries[BOOT_KEY];
    assert_eq!(entry["color_theme_slug"], "bento-grids");
    assert_eq!(entry["schema_version"], SCHEMA_VERSION);
    assert_eq!(entry["theme"]["custom_css"], "");
    assert_eq!(entry["theme"]["color_theme"], "Bento Grids");
    assert_eq!(boot.entries["user"], "Administrator");

    let flattened = serde_json::to_value(&boot).unwrap();
    assert!(flattened.get(BOOT_KEY).is_some());
}
