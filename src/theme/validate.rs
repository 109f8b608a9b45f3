//! Update validation
//!
//! Checks a candidate `field -> value` payload against the allow-list, coerces
//! each value to its field kind and enforces the three numeric ranges. Never
//! touches a store.

use crate::error::ValidationError;
use crate::schema::{self, FieldKind, FieldSpec, FieldValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Updates that passed validation, keyed by current (non-alias) field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedUpdates {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl ValidatedUpdates {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every current field set to its default, with the free-text overrides
    /// blanked. Used by reset.
    pub fn defaults() -> Self {
        let fields = schema::FIELDS
            .iter()
            .map(|spec| (spec.name, spec.default_value()))
            .collect();
        Self { fields }
    }
}

/// Accept either a JSON object or a string holding one.
pub fn parse_payload(payload: &Value) -> Result<Map<String, Value>, ValidationError> {
    match payload {
        Value::Object(map) => Ok(map.clone()),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ValidationError::InvalidPayload(format!(
                "expected an object, got {}",
                json_type(&other)
            ))),
            Err(e) => Err(ValidationError::InvalidPayload(e.to_string())),
        },
        other => Err(ValidationError::InvalidPayload(format!(
            "expected an object, got {}",
            json_type(other)
        ))),
    }
}

/// Validate a candidate update payload.
pub fn validate(candidate: &Map<String, Value>) -> Result<ValidatedUpdates, ValidationError> {
    // Unknown names are rejected before any value is looked at.
    if let Some(name) = candidate
        .keys()
        .find(|name| schema::writable_field(name).is_none())
    {
        warn!(field = %name, "Rejected write to field outside the allow-list");
        return Err(ValidationError::FieldNotPermitted(name.clone()));
    }

    let mut fields: BTreeMap<&'static str, FieldValue> = BTreeMap::new();
    let mut written_as: BTreeMap<&'static str, &str> = BTreeMap::new();
    for (name, raw) in candidate {
        let (spec, value) = validate_field(name, raw)?;
        if let Some(existing) = fields.get(spec.name) {
            if existing != &value {
                let first = written_as.get(spec.name).copied().unwrap_or(spec.name);
                let alias = if first == spec.name { name.as_str() } else { first };
                return Err(ValidationError::ConflictingAlias {
                    alias: alias.to_string(),
                    field: spec.name.to_string(),
                });
            }
            continue;
        }
        written_as.insert(spec.name, name.as_str());
        fields.insert(spec.name, value);
    }
    Ok(ValidatedUpdates { fields })
}

/// Validate one field. Legacy alias names resolve to their current field.
pub fn validate_field(
    name: &str,
    raw: &Value,
) -> Result<(&'static FieldSpec, FieldValue), ValidationError> {
    let spec = schema::writable_field(name)
        .ok_or_else(|| ValidationError::FieldNotPermitted(name.to_string()))?;
    let value = coerce(spec, raw)?;

    if let Some(v) = value.as_int() {
        match spec.range {
            Some((min, max)) if v != 0 && (v < min || v > max) => {
                return Err(ValidationError::OutOfRange {
                    field: spec.name.to_string(),
                    label: spec.label.to_string(),
                    min,
                    max,
                });
            }
            None if spec.kind == FieldKind::Int && v < 0 => {
                return Err(ValidationError::InvalidValue {
                    field: spec.name.to_string(),
                    reason: format!("must not be negative, got {}", v),
                });
            }
            _ => {}
        }
    }
    Ok((spec, value))
}

fn coerce(spec: &FieldSpec, raw: &Value) -> Result<FieldValue, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidValue {
        field: spec.name.to_string(),
        reason,
    };

    match spec.kind {
        FieldKind::Check => match raw {
            Value::Bool(b) => Ok(FieldValue::Int(i64::from(*b))),
            Value::Number(n) => match n.as_i64() {
                Some(v @ (0 | 1)) => Ok(FieldValue::Int(v)),
                _ => Err(invalid(format!("expected 0 or 1, got {}", n))),
            },
            Value::String(s) => match s.trim() {
                "0" | "false" => Ok(FieldValue::Int(0)),
                "1" | "true" => Ok(FieldValue::Int(1)),
                other => Err(invalid(format!("expected 0 or 1, got '{}'", other))),
            },
            other => Err(invalid(format!("expected 0 or 1, got {}", json_type(other)))),
        },
        FieldKind::Int => match raw {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| is_exact_i64(*f)).map(|f| f as i64))
                .map(FieldValue::Int)
                .ok_or_else(|| invalid(format!("expected an integer, got {}", n))),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| invalid(format!("expected an integer, got '{}'", s))),
            other => Err(invalid(format!("expected an integer, got {}", json_type(other)))),
        },
        FieldKind::Text => match raw {
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Null => Ok(FieldValue::Text(String::new())),
            other => Err(invalid(format!("expected text, got {}", json_type(other)))),
        },
        FieldKind::Color => match raw {
            Value::String(s) if s.is_empty() || is_hex_color(s) => {
                Ok(FieldValue::Text(s.clone()))
            }
            Value::String(s) => Err(invalid(format!("'{}' is not a hex color", s))),
            Value::Null => Ok(FieldValue::Text(String::new())),
            other => Err(invalid(format!("expected a color, got {}", json_type(other)))),
        },
        FieldKind::Select(options) => match raw {
            Value::String(s) if options.contains(&s.as_str()) => Ok(FieldValue::Text(s.clone())),
            Value::String(s) => Err(invalid(format!(
                "'{}' is not one of {}",
                s,
                options.join(", ")
            ))),
            other => Err(invalid(format!("expected one of {}, got {}", options.join(", "), json_type(other)))),
        },
    }
}

/// Whole-valued float that converts to i64 without saturating.
fn is_exact_i64(f: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

pub(crate) fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
