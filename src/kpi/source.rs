//! Pre-aggregated figures behind the KPI cards.
//!
//! A `KpiSource` answers per workspace. `Ok(None)` means the workspace has no
//! data to show (module not installed, no default company).

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceFigures {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub revenue_this_month: f64,
    #[serde(default)]
    pub revenue_last_month: f64,
    #[serde(default)]
    pub expenses_this_month: f64,
    #[serde(default)]
    pub receivables: f64,
    #[serde(default)]
    pub payables: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesFigures {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub orders_this_month: u64,
    #[serde(default)]
    pub revenue_this_month: f64,
    #[serde(default)]
    pub active_customers: u64,
    #[serde(default)]
    pub pending_deliveries: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchasingFigures {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub orders_this_month: u64,
    #[serde(default)]
    pub pending_receipts: u64,
    #[serde(default)]
    pub active_suppliers: u64,
    #[serde(default)]
    pub spend_this_month: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryFigures {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub stock_value: f64,
    #[serde(default)]
    pub low_stock_items: u64,
    #[serde(default)]
    pub pending_transfers: u64,
    #[serde(default)]
    pub warehouses: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeopleFigures {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub present_today: u64,
    #[serde(default)]
    pub on_leave: u64,
    /// Absent when recruitment is not installed
    #[serde(default)]
    pub open_positions: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingFigures {
    #[serde(default)]
    pub active_work_orders: u64,
    #[serde(default)]
    pub completed_this_month: u64,
    #[serde(default)]
    pub overdue: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsFigures {
    #[serde(default)]
    pub active_projects: u64,
    #[serde(default)]
    pub overdue_tasks: u64,
    #[serde(default)]
    pub tasks_completed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionFigures {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub passed: u64,
    #[serde(default)]
    pub failed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityFigures {
    /// This month's inspections, when inspections are tracked
    #[serde(default)]
    pub inspections: Option<InspectionFigures>,
    /// Open non-conformance reports, when tracked
    #[serde(default)]
    pub open_ncrs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetsFigures {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub total_assets: u64,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub pending_repairs: u64,
}

/// Supplier of workspace figures. Every method defaults to "no data".
pub trait KpiSource {
    fn finance(&self) -> Result<Option<FinanceFigures>, ApiError> {
        Ok(None)
    }

    fn sales(&self) -> Result<Option<SalesFigures>, ApiError> {
        Ok(None)
    }

    fn purchasing(&self) -> Result<Option<PurchasingFigures>, ApiError> {
        Ok(None)
    }

    fn inventory(&self) -> Result<Option<InventoryFigures>, ApiError> {
        Ok(None)
    }

    fn people(&self) -> Result<Option<PeopleFigures>, ApiError> {
        Ok(None)
    }

    fn manufacturing(&self) -> Result<Option<ManufacturingFigures>, ApiError> {
        Ok(None)
    }

    fn projects(&self) -> Result<Option<ProjectsFigures>, ApiError> {
        Ok(None)
    }

    fn quality(&self) -> Result<Option<QualityFigures>, ApiError> {
        Ok(None)
    }

    fn assets(&self) -> Result<Option<AssetsFigures>, ApiError> {
        Ok(None)
    }
}

/// Figures captured in a file, one optional table per workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    #[serde(default)]
    pub finance: Option<FinanceFigures>,
    #[serde(default)]
    pub sales: Option<SalesFigures>,
    #[serde(default)]
    pub purchasing: Option<PurchasingFigures>,
    #[serde(default)]
    pub inventory: Option<InventoryFigures>,
    #[serde(default)]
    pub people: Option<PeopleFigures>,
    #[serde(default)]
    pub manufacturing: Option<ManufacturingFigures>,
    #[serde(default)]
    pub projects: Option<ProjectsFigures>,
    #[serde(default)]
    pub quality: Option<QualityFigures>,
    #[serde(default)]
    pub assets: Option<AssetsFigures>,
}

impl KpiSnapshot {
    /// Load a snapshot; `.toml` files are read as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ApiError::KpiSource(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        if is_toml {
            Self::from_toml(&raw)
        } else {
            Self::from_json(&raw)
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw)
            .map_err(|e| ApiError::KpiSource(format!("Invalid figures JSON: {}", e)))
    }

    pub fn from_toml(raw: &str) -> Result<Self, ApiError> {
        toml::from_str(raw).map_err(|e| ApiError::KpiSource(format!("Invalid figures TOML: {}", e)))
    }
}

impl KpiSource for KpiSnapshot {
    fn finance(&self) -> Result<Option<FinanceFigures>, ApiError> {
        Ok(self.finance.clone())
    }

    fn sales(&self) -> Result<Option<SalesFigures>, ApiError> {
        Ok(self.sales.clone())
    }

    fn purchasing(&self) -> Result<Option<PurchasingFigures>, ApiError> {
        Ok(self.purchasing.clone())
    }

    fn inventory(&self) -> Result<Option<InventoryFigures>, ApiError> {
        Ok(self.inventory.clone())
    }

    fn people(&self) -> Result<Option<PeopleFigures>, ApiError> {
        Ok(self.people.clone())
    }

    fn manufacturing(&self) -> Result<Option<ManufacturingFigures>, ApiError> {
        Ok(self.manufacturing.clone())
    }

    fn projects(&self) -> Result<Option<ProjectsFigures>, ApiError> {
        Ok(self.projects.clone())
    }

    fn quality(&self) -> Result<Option<QualityFigures>, ApiError> {
        Ok(self.quality.clone())
    }

    fn assets(&self) -> Result<Option<AssetsFigures>, ApiError> {
        Ok(self.assets.clone())
    }
}
