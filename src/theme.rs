//! Theme settings: resolved configuration, resolver, validator and service.

pub mod resolve;
pub mod service;
pub mod validate;

pub use resolve::{default_config, resolve};
pub use service::{CacheInvalidator, NoopInvalidator, ThemeService};
pub use validate::{parse_payload, validate, validate_field, ValidatedUpdates};

use crate::schema::{self, FieldValue, ADVANCED_FIELDS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fully resolved theme: every current field and every legacy alias mapped to
/// its effective value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeConfig {
    values: BTreeMap<String, FieldValue>,
}

impl ThemeConfig {
    pub(crate) fn from_values(values: BTreeMap<String, FieldValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_int)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// True when a 0/1 toggle field is set.
    pub fn flag(&self, field: &str) -> bool {
        self.int(field).map(|v| v != 0).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Variant served to unauthenticated callers: free-text CSS/JS overrides
    /// are blanked.
    pub fn guest_safe(&self) -> Self {
        let mut values = self.values.clone();
        for field in ADVANCED_FIELDS {
            values.insert(field.to_string(), FieldValue::Text(String::new()));
        }
        Self { values }
    }

    /// Stylesheet slug of the selected color theme.
    pub fn color_theme_slug(&self) -> String {
        schema::color_theme_slug(self.text("color_theme").unwrap_or("Silver"))
    }

    /// Current (non-alias) fields as a write payload.
    pub fn as_updates(&self) -> serde_json::Map<String, serde_json::Value> {
        schema::FIELDS
            .iter()
            .filter_map(|spec| {
                let value = self.get(spec.name)?;
                let json = serde_json::to_value(value).ok()?;
                Some((spec.name.to_string(), json))
            })
            .collect()
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        default_config()
    }
}
