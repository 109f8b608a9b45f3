//! Integration tests for workspace KPI cards built from figure snapshots

use tempfile::TempDir;
use vitrine::config::ApiConfig;
use vitrine::error::ApiError;
use vitrine::kpi::source::{FinanceFigures, QualityFigures};
use vitrine::kpi::{get_module_kpis, get_workspace_kpis, KpiApi, KpiSnapshot, KpiSource, Trend, Variant};

const FIGURES_TOML: &str = r#"
[finance]
currency = "EGP"
revenue_this_month = 120000
revenue_last_month = 100000
expenses_this_month = 130000.4
receivables = 5000
payables = 0

[sales]
orders_this_month = 42
revenue_this_month = 98765.5
active_customers = 17
pending_deliveries = 0

[quality.inspections]
total = 8
passed = 6
failed = 2
"#;

fn snapshot_file(dir: &TempDir, name: &str, contents: &str) -> KpiSnapshot {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    KpiSnapshot::load(&path).unwrap()
}

#[test]
fn test_finance_cards_from_toml() {
    let dir = TempDir::new().unwrap();
    let snapshot = snapshot_file(&dir, "figures.toml", FIGURES_TOML);
    let cards = get_workspace_kpis(&snapshot, "finance");
    assert_eq!(cards.len(), 5);

    assert_eq!(cards[0].label, "Total Revenue");
    assert_eq!(cards[0].value, "EGP 120,000");
    assert_eq!(cards[0].trend, Some(Trend::Up));
    assert_eq!(cards[0].trend_value, Some(20.0));

    assert_eq!(cards[2].label, "Net Profit");
    assert_eq!(cards[2].value, "EGP -10,000");
    assert_eq!(cards[2].trend, Some(Trend::Down));
    assert_eq!(cards[2].variant, Some(Variant::Error));

    assert_eq!(cards[4].value, "EGP 0");
}

#[test]
fn test_module_names_are_aliases() {
    let dir = TempDir::new().unwrap();
    let snapshot = snapshot_file(&dir, "figures.toml", FIGURES_TOML);
    assert_eq!(
        get_module_kpis(&snapshot, "selling"),
        get_workspace_kpis(&snapshot, "sales")
    );
    assert_eq!(
        get_module_kpis(&snapshot, "accounting"),
        get_workspace_kpis(&snapshot, "finance")
    );
}

#[test]
fn test_quality_pass_rate() {
    let dir = TempDir::new().unwrap();
    let snapshot = snapshot_file(&dir, "figures.toml", FIGURES_TOML);
    let cards = get_workspace_kpis(&snapshot, "quality");
    let labels: Vec<&str> = cards.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Inspections This Month", "Passed", "Failed", "Pass Rate"]
    );
    assert_eq!(cards[3].value, "75.0%");
    assert_eq!(cards[3].variant, Some(Variant::Warning));
}

#[test]
fn test_missing_and_unknown_workspaces_are_empty() {
    let dir = TempDir::new().unwrap();
    let snapshot = snapshot_file(&dir, "figures.json", r#"{"sales": {"orders_this_month": 3}}"#);
    assert!(get_workspace_kpis(&snapshot, "assets").is_empty());
    assert!(get_workspace_kpis(&snapshot, "crm").is_empty());

    let sales = get_workspace_kpis(&snapshot, "sales");
    assert_eq!(sales[0].value, "3");
    assert_eq!(sales[1].value, "USD 0");
}

#[test]
fn test_invalid_snapshot_reports_source_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("figures.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(KpiSnapshot::load(&path), Err(ApiError::KpiSource(_))));
    assert!(matches!(
        KpiSnapshot::load(&dir.path().join("absent.json")),
        Err(ApiError::KpiSource(_))
    ));
}

struct FlakySource;

impl KpiSource for FlakySource {
    fn finance(&self) -> Result<Option<FinanceFigures>, ApiError> {
        Err(ApiError::KpiSource("x".repeat(500)))
    }

    fn quality(&self) -> Result<Option<QualityFigures>, ApiError> {
        Ok(Some(QualityFigures {
            inspections: None,
            open_ncrs: Some(0),
        }))
    }
}

#[test]
fn test_source_errors_yield_no_cards() {
    let api = KpiApi::with_limits(ApiConfig::default());
    assert!(api.get_workspace_kpis(&FlakySource, "finance").is_empty());

    let quality = api.get_workspace_kpis(&FlakySource, "quality");
    assert_eq!(quality.len(), 1);
    assert_eq!(quality[0].label, "Open NCRs");
    assert_eq!(quality[0].variant, None);
}
