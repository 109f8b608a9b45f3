//! Theme presentation: resolved configuration and field table.

use crate::cli::presentation::shared::to_pretty_json;
use crate::error::ApiError;
use crate::schema::{self, DefaultValue, FieldKind, FIELDS, LEGACY_ALIASES};
use crate::theme::ThemeConfig;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_theme_text(config: &ThemeConfig, guest: bool) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Category", "Field", "Value"]);
    for spec in FIELDS {
        let value = config.get(spec.name).map(|v| v.to_string()).unwrap_or_default();
        table.add_row(vec![spec.category.as_str(), spec.name, value.as_str()]);
    }
    for alias in LEGACY_ALIASES {
        let value = config.get(alias.alias).map(|v| v.to_string()).unwrap_or_default();
        let label = format!("{} -> {}", alias.alias, alias.target);
        table.add_row(vec!["Legacy", label.as_str(), value.as_str()]);
    }

    let view = if guest { "guest view" } else { "authenticated view" };
    format!(
        "{} ({}, color theme slug: {})\n{}",
        "Theme settings".bold(),
        view,
        config.color_theme_slug(),
        table
    )
}

pub fn format_theme_json(config: &ThemeConfig) -> Result<String, ApiError> {
    to_pretty_json(config)
}

fn describe_constraint(kind: FieldKind, range: Option<(i64, i64)>) -> String {
    match (kind, range) {
        (_, Some((min, max))) => format!("{}–{}", min, max),
        (FieldKind::Select(options), None) => options.join(" | "),
        (FieldKind::Check, None) => "0 | 1".to_string(),
        (FieldKind::Color, None) => "#hex".to_string(),
        _ => String::new(),
    }
}

fn describe_default(default: DefaultValue) -> String {
    match default {
        DefaultValue::Int(v) => v.to_string(),
        DefaultValue::Text("") => "\"\"".to_string(),
        DefaultValue::Text(s) => s.to_string(),
    }
}

pub fn format_fields_text() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Category", "Kind", "Default", "Accepts"]);
    for spec in FIELDS {
        table.add_row(vec![
            spec.name.to_string(),
            spec.category.as_str().to_string(),
            spec.kind.as_str().to_string(),
            describe_default(spec.default),
            describe_constraint(spec.kind, spec.range),
        ]);
    }
    for alias in LEGACY_ALIASES {
        table.add_row(vec![
            alias.alias.to_string(),
            "Legacy".to_string(),
            "alias".to_string(),
            String::new(),
            format!("same as {}", alias.target),
        ]);
    }
    format!(
        "{}\n{}\nSchema version {}; {} writable names.",
        "Theme fields".bold(),
        table,
        schema::SCHEMA_VERSION,
        schema::allow_list().count()
    )
}

pub fn format_fields_json() -> Result<String, ApiError> {
    let fields: Vec<_> = FIELDS
        .iter()
        .map(|spec| {
            json!({
                "name": spec.name,
                "label": spec.label,
                "category": spec.category.as_str(),
                "kind": spec.kind.as_str(),
                "default": spec.default_value(),
                "range": spec.range.map(|(min, max)| json!([min, max])),
            })
        })
        .collect();
    let aliases: Vec<_> = LEGACY_ALIASES
        .iter()
        .map(|a| json!({ "alias": a.alias, "target": a.target }))
        .collect();
    to_pretty_json(&json!({
        "schema_version": schema::SCHEMA_VERSION,
        "fields": fields,
        "legacy_aliases": aliases,
    }))
}
