//! End-to-end tests driving the `vitrine` binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn vitrine(test_dir: &TempDir, args: &[&str]) -> Output {
    let workspace = test_dir.path().join("ws");
    std::fs::create_dir_all(&workspace).unwrap();
    Command::new(env!("CARGO_BIN_EXE_vitrine"))
        .arg("--workspace")
        .arg(&workspace)
        .arg("--quiet")
        .args(args)
        .env("HOME", test_dir.path().join("home"))
        .env("XDG_CONFIG_HOME", test_dir.path().join("xdg"))
        .env_remove("VITRINE_ENV")
        .env_remove("VITRINE_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_install_set_and_show() {
    let test_dir = TempDir::new().unwrap();

    let output = vitrine(&test_dir, &["install"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("created with defaults"));

    let output = vitrine(&test_dir, &["install"]);
    assert!(stdout(&output).contains("already up to date"));

    let output = vitrine(&test_dir, &["theme", "set", "navbar_style", "Solid"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = vitrine(&test_dir, &["theme", "show", "--format", "json"]);
    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(config["header_style"], "Solid");
    assert_eq!(config["navbar_style"], "Solid");
    assert_eq!(config["sidebar_width"], 260);

    assert!(test_dir.path().join("ws/.vitrine/store").is_dir());
}

#[test]
fn test_rejected_write_exits_nonzero() {
    let test_dir = TempDir::new().unwrap();
    vitrine(&test_dir, &["install"]);

    let output = vitrine(&test_dir, &["theme", "set", "owner", "x"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Field not permitted: owner"));

    let output = vitrine(&test_dir, &["theme", "set", "glass_opacity", "101"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Glass Opacity must be between 0 and 100"));
}

#[test]
fn test_guest_show_hides_custom_code() {
    let test_dir = TempDir::new().unwrap();
    vitrine(&test_dir, &["install"]);
    let output = vitrine(
        &test_dir,
        &["theme", "save", r#"{"custom_css": "body { color: red; }", "dark_mode": 1}"#],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let output = vitrine(&test_dir, &["theme", "show", "--guest", "--format", "json"]);
    let config: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(config["custom_css"], "");
    assert_eq!(config["dark_mode"], 1);

    let output = vitrine(&test_dir, &["theme", "show", "--format", "json"]);
    let config: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(config["custom_css"], "body { color: red; }");
}

#[test]
fn test_favorites_round() {
    let test_dir = TempDir::new().unwrap();

    let output = vitrine(&test_dir, &["favorites", "add", "Sales Invoice", "--label", "Invoices"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = vitrine(&test_dir, &["favorites", "add", "Sales Invoice"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Already in favorites"));

    let output = vitrine(&test_dir, &["favorites", "list", "--format", "json"]);
    let favorites: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(favorites[0]["route"], "/app/sales-invoice");
    assert_eq!(favorites[0]["type"], "DocType");

    let output = vitrine(&test_dir, &["--user", "Guest", "favorites", "list", "--format", "json"]);
    let favorites: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(favorites, serde_json::json!([]));

    let output = vitrine(&test_dir, &["favorites", "remove", "Sales Invoice"]);
    assert!(output.status.success());
}

#[test]
fn test_kpi_from_figures_file() {
    let test_dir = TempDir::new().unwrap();
    let figures = test_dir.path().join("figures.json");
    std::fs::write(
        &figures,
        r#"{"inventory": {"stock_value": 1234.5, "low_stock_items": 2, "warehouses": 3}}"#,
    )
    .unwrap();

    let output = vitrine(
        &test_dir,
        &["kpi", "stock", "--figures", path_str(&figures), "--format", "json"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let cards: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(cards[0]["value"], "USD 1,235");
    assert_eq!(cards[1]["variant"], "error");

    let output = vitrine(
        &test_dir,
        &["kpi", "inventory", "--figures", path_str(&test_dir.path().join("missing.json"))],
    );
    assert!(!output.status.success());
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}
