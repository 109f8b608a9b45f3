//! Dashboard presentation: KPI cards and favorites.

use crate::cli::presentation::shared::to_pretty_json;
use crate::error::ApiError;
use crate::favorites::Favorite;
use crate::kpi::{KpiCard, Trend, Variant};
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;

fn trend_cell(card: &KpiCard) -> String {
    let arrow = match card.trend {
        Some(Trend::Up) => "▲",
        Some(Trend::Down) => "▼",
        Some(Trend::Neutral) => "–",
        None => return String::new(),
    };
    match card.trend_value {
        Some(value) => format!("{} {:.1}%", arrow, value),
        None => arrow.to_string(),
    }
}

fn variant_cell(variant: Option<Variant>) -> String {
    match variant {
        Some(v @ Variant::Success) => v.as_str().green().to_string(),
        Some(v @ Variant::Warning) => v.as_str().yellow().to_string(),
        Some(v @ Variant::Error) => v.as_str().red().to_string(),
        None => String::new(),
    }
}

pub fn format_kpi_cards_text(workspace: &str, cards: &[KpiCard]) -> String {
    if cards.is_empty() {
        return format!("No KPIs available for '{}'.", workspace);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["KPI", "Value", "Trend", "Status", "Icon"]);
    for card in cards {
        table.add_row(vec![
            card.label.clone(),
            card.value.clone(),
            trend_cell(card),
            variant_cell(card.variant),
            card.icon.clone(),
        ]);
    }
    format!("{}\n{}", workspace.bold(), table)
}

pub fn format_kpi_cards_json(cards: &[KpiCard]) -> Result<String, ApiError> {
    to_pretty_json(&cards)
}

pub fn format_favorites_text(user: &str, favorites: &[Favorite]) -> String {
    if favorites.is_empty() {
        return format!(
            "No favorites for {}.\n\nUse 'vitrine favorites add <target>' to add one.",
            user
        );
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Label", "Route", "Type"]);
    for favorite in favorites {
        table.add_row(vec![
            favorite.label.as_str(),
            favorite.route.as_str(),
            favorite.kind.as_str(),
        ]);
    }
    format!("{}\nTotal: {} favorite(s)", table, favorites.len())
}

pub fn format_favorites_json(favorites: &[Favorite]) -> Result<String, ApiError> {
    to_pretty_json(&favorites)
}
