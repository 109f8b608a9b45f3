//! Settings resolution
//!
//! Layers stored values over per-field defaults and mirrors legacy aliases.
//! Resolution is total: an absent record, or any stored value that does not
//! fit its field, falls back to the default.

use crate::schema::{FieldKind, FieldSpec, FieldValue, FIELDS, LEGACY_ALIASES};
use crate::store::SettingsRecord;
use crate::theme::validate::is_hex_color;
use crate::theme::ThemeConfig;
use std::collections::BTreeMap;

/// The fixed fallback configuration.
pub fn default_config() -> ThemeConfig {
    let mut values: BTreeMap<String, FieldValue> = FIELDS
        .iter()
        .map(|spec| (spec.name.to_string(), spec.default_value()))
        .collect();
    mirror_aliases(&mut values);
    ThemeConfig::from_values(values)
}

/// Resolve a possibly absent, possibly partial record into a full config.
pub fn resolve(record: Option<&SettingsRecord>) -> ThemeConfig {
    let Some(record) = record else {
        return default_config();
    };

    let mut values = BTreeMap::new();
    for spec in FIELDS {
        let value = match record.get(spec.name) {
            Some(stored) if accepts(spec, stored) => stored.clone(),
            _ => spec.default_value(),
        };
        values.insert(spec.name.to_string(), value);
    }
    mirror_aliases(&mut values);
    ThemeConfig::from_values(values)
}

/// Whether a stored value overrides the default.
///
/// Toggles keep an explicit 0. Everything else must be truthy and still
/// acceptable to the write path: select values among the options, colors in
/// hex form, ranged integers within bounds.
fn accepts(spec: &FieldSpec, stored: &FieldValue) -> bool {
    match (spec.kind, stored) {
        (FieldKind::Check, FieldValue::Int(v)) => *v == 0 || *v == 1,
        (FieldKind::Int, FieldValue::Int(v)) => match spec.range {
            Some((min, max)) => *v != 0 && (min..=max).contains(v),
            None => *v > 0,
        },
        (FieldKind::Text, FieldValue::Text(s)) => !s.is_empty(),
        (FieldKind::Color, FieldValue::Text(s)) => is_hex_color(s),
        (FieldKind::Select(options), FieldValue::Text(s)) => options.contains(&s.as_str()),
        _ => false,
    }
}

fn mirror_aliases(values: &mut BTreeMap<String, FieldValue>) {
    for alias in LEGACY_ALIASES {
        if let Some(current) = values.get(alias.target).cloned() {
            values.insert(alias.alias.to_string(), current);
        }
    }
}
