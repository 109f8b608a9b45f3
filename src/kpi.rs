//! Dashboard KPIs
//!
//! Turns pre-aggregated workspace figures into display cards. Lookups never
//! fail: an unknown workspace, a source without data or a source error all
//! produce an empty card list.

pub mod cards;
pub mod format;
pub mod source;

pub use format::{fmt_money, fmt_percent, trend_percent};
pub use source::{KpiSnapshot, KpiSource};

use crate::api::truncate_message;
use crate::config::ApiConfig;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Direction of a metric against its previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Trend::Up
        } else if delta < 0.0 {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

/// Card accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Success,
    Warning,
    Error,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Success => "success",
            Variant::Warning => "warning",
            Variant::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_value: Option<f64>,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
}

impl KpiCard {
    pub fn new(label: &str, value: impl Into<String>, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            trend: None,
            trend_value: None,
            icon: icon.to_string(),
            variant: None,
        }
    }

    pub fn with_trend(mut self, trend: Trend, value: Option<f64>) -> Self {
        self.trend = Some(trend);
        self.trend_value = value;
        self
    }

    pub fn with_variant(mut self, variant: Option<Variant>) -> Self {
        self.variant = variant;
        self
    }
}

/// Dashboard workspaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workspace {
    Finance,
    Sales,
    Purchasing,
    Inventory,
    Manufacturing,
    People,
    Projects,
    Quality,
    Assets,
}

impl Workspace {
    pub const ALL: [Workspace; 9] = [
        Workspace::Finance,
        Workspace::Sales,
        Workspace::Purchasing,
        Workspace::Inventory,
        Workspace::Manufacturing,
        Workspace::People,
        Workspace::Projects,
        Workspace::Quality,
        Workspace::Assets,
    ];

    /// Resolve a workspace name, accepting the older module names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "finance" | "accounting" => Some(Workspace::Finance),
            "sales" | "selling" => Some(Workspace::Sales),
            "purchasing" | "buying" => Some(Workspace::Purchasing),
            "inventory" | "stock" => Some(Workspace::Inventory),
            "manufacturing" => Some(Workspace::Manufacturing),
            "people" | "hr" => Some(Workspace::People),
            "projects" => Some(Workspace::Projects),
            "quality" => Some(Workspace::Quality),
            "assets" => Some(Workspace::Assets),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Workspace::Finance => "finance",
            Workspace::Sales => "sales",
            Workspace::Purchasing => "purchasing",
            Workspace::Inventory => "inventory",
            Workspace::Manufacturing => "manufacturing",
            Workspace::People => "people",
            Workspace::Projects => "projects",
            Workspace::Quality => "quality",
            Workspace::Assets => "assets",
        }
    }

    /// Build this workspace's cards from `source`.
    pub fn cards(&self, source: &dyn KpiSource) -> Result<Vec<KpiCard>, ApiError> {
        let cards = match self {
            Workspace::Finance => source.finance()?.map(|f| cards::finance(&f)),
            Workspace::Sales => source.sales()?.map(|f| cards::sales(&f)),
            Workspace::Purchasing => source.purchasing()?.map(|f| cards::purchasing(&f)),
            Workspace::Inventory => source.inventory()?.map(|f| cards::inventory(&f)),
            Workspace::Manufacturing => source.manufacturing()?.map(|f| cards::manufacturing(&f)),
            Workspace::People => source.people()?.map(|f| cards::people(&f)),
            Workspace::Projects => source.projects()?.map(|f| cards::projects(&f)),
            Workspace::Quality => source.quality()?.map(|f| cards::quality(&f)),
            Workspace::Assets => source.assets()?.map(|f| cards::assets(&f)),
        };
        Ok(cards.unwrap_or_default())
    }
}

/// KPI endpoints.
#[derive(Debug, Clone, Default)]
pub struct KpiApi {
    limits: ApiConfig,
}

impl KpiApi {
    pub fn with_limits(limits: ApiConfig) -> Self {
        Self { limits }
    }

    pub fn get_workspace_kpis(&self, source: &dyn KpiSource, workspace: &str) -> Vec<KpiCard> {
        let Some(ws) = Workspace::parse(workspace) else {
            debug!(workspace, "Unknown KPI workspace");
            return Vec::new();
        };
        match ws.cards(source) {
            Ok(cards) => cards,
            Err(e) => {
                let message = truncate_message(&e.to_string(), self.limits.kpi_error_message_limit);
                error!(workspace = ws.as_str(), error = %message, "Workspace KPI error");
                Vec::new()
            }
        }
    }

    /// Older name for `get_workspace_kpis`.
    pub fn get_module_kpis(&self, source: &dyn KpiSource, module: &str) -> Vec<KpiCard> {
        self.get_workspace_kpis(source, module)
    }
}

/// `KpiApi::get_workspace_kpis` with default limits.
pub fn get_workspace_kpis(source: &dyn KpiSource, workspace: &str) -> Vec<KpiCard> {
    KpiApi::default().get_workspace_kpis(source, workspace)
}

pub fn get_module_kpis(source: &dyn KpiSource, module: &str) -> Vec<KpiCard> {
    KpiApi::default().get_module_kpis(source, module)
}
