//! CLI presentation: text/json formatters for command results.

mod dashboard;
mod shared;
mod theme;

pub use dashboard::{
    format_favorites_json, format_favorites_text, format_kpi_cards_json, format_kpi_cards_text,
};
pub use shared::{format_lifecycle_outcome, format_response};
pub use theme::{format_fields_json, format_fields_text, format_theme_json, format_theme_text};
