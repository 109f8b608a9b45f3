//! Property-based tests for resolution and validation guarantees

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::sync::Arc;
use vitrine::error::ValidationError;
use vitrine::schema::{self, FieldValue, COLOR_THEMES, LEGACY_ALIASES};
use vitrine::store::{MemorySettingsStore, SettingsRecord};
use vitrine::theme::{resolve, validate, ThemeService};

fn hex_color() -> impl Strategy<Value = String> {
    "#[0-9a-f]{6}"
}

/// Every legacy alias reads the same value as its replacement field
#[test]
fn test_aliases_mirror_targets() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(hex_color(), hex_color(), 1i64..500, "[A-Za-z]{1,12}"),
            |(start, middle, blur, style)| {
                let mut record = SettingsRecord::new();
                record.set("body_gradient_start", FieldValue::from(start.as_str()));
                record.set("body_gradient_middle", FieldValue::from(middle.as_str()));
                record.set("header_blur", FieldValue::Int(blur));
                record.set("header_style", FieldValue::from(style.as_str()));

                let config = resolve(Some(&record));
                for alias in LEGACY_ALIASES {
                    prop_assert_eq!(config.get(alias.alias), config.get(alias.target));
                }
                prop_assert_eq!(config.text("gradient_start"), Some(start.as_str()));
                prop_assert_eq!(config.int("navbar_blur"), Some(blur));
                Ok(())
            },
        )
        .unwrap();
}

/// Saving the resolved configuration back changes nothing
#[test]
fn test_saving_resolved_config_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1i64..=100, 200i64..=400, any::<bool>(), hex_color()),
            |(glass_blur, sidebar_width, dark, primary)| {
                let service = ThemeService::new(Arc::new(MemorySettingsStore::with_record(
                    SettingsRecord::with_defaults(),
                )));
                let mut payload = Map::new();
                payload.insert("glass_blur".to_string(), Value::from(glass_blur));
                payload.insert("sidebar_width".to_string(), Value::from(sidebar_width));
                payload.insert("dark_mode".to_string(), Value::Bool(dark));
                payload.insert("primary_color".to_string(), Value::from(primary.clone()));

                let first = service.save(&payload).unwrap();
                prop_assert_eq!(first.int("glass_blur"), Some(glass_blur));
                prop_assert_eq!(first.int("sidebar_width"), Some(sidebar_width));
                prop_assert_eq!(first.flag("dark_mode"), dark);
                prop_assert_eq!(first.text("primary_color"), Some(primary.as_str()));

                let second = service.save(&first.as_updates()).unwrap();
                prop_assert_eq!(&second, &first);
                prop_assert_eq!(service.current(), first);
                Ok(())
            },
        )
        .unwrap();
}

fn seeded_service() -> ThemeService {
    let service = ThemeService::new(Arc::new(MemorySettingsStore::with_record(
        SettingsRecord::with_defaults(),
    )));
    let prior = serde_json::json!({
        "glass_blur": 55,
        "sidebar_width": 320,
        "dark_mode": 1,
        "primary_color": "#112233",
        "color_theme": "Purple",
        "header_style": "Solid",
        "header_blur": 44,
        "font_family": "Inter",
        "custom_css": "body{}",
        "show_footer": 0,
    });
    service.save(prior.as_object().unwrap()).unwrap();
    service
}

/// A write changes exactly the fields it names; everything else, aliases
/// included, keeps its previously resolved value
#[test]
fn test_write_touches_only_named_fields() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let updates = (
        proptest::option::of(1i64..=100),
        proptest::option::of(200i64..=400),
        proptest::option::of(any::<bool>()),
        proptest::option::of(hex_color()),
        proptest::option::of(proptest::sample::select(COLOR_THEMES)),
        proptest::option::of("[A-Za-z]{1,10}"),
        proptest::option::of(1i64..200),
        proptest::option::of("[A-Za-z]{1,10}"),
    );

    runner
        .run(
            &updates,
            |(glass_blur, sidebar_width, dark, primary, theme, navbar_style, header_blur, font)| {
                let service = seeded_service();
                let before = service.current();

                let mut payload = Map::new();
                let mut put = |name: &str, value: Option<Value>| {
                    if let Some(value) = value {
                        payload.insert(name.to_string(), value);
                    }
                };
                put("glass_blur", glass_blur.map(Value::from));
                put("sidebar_width", sidebar_width.map(Value::from));
                put("dark_mode", dark.map(Value::Bool));
                put("primary_color", primary.map(Value::from));
                put("color_theme", theme.map(Value::from));
                put("navbar_style", navbar_style.map(Value::from));
                put("header_blur", header_blur.map(Value::from));
                put("font_family", font.map(Value::from));

                let written = validate(&payload).unwrap();
                let after = service.save(&payload).unwrap();
                prop_assert_eq!(after.len(), before.len());

                for (name, value) in after.iter() {
                    let field = schema::alias_target(name).unwrap_or(name);
                    match written.get(field) {
                        Some(expected) => prop_assert_eq!(value, expected, "{}", name),
                        None => prop_assert_eq!(Some(value), before.get(name), "{}", name),
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Names outside the allow-list are always rejected, whatever the value
#[test]
fn test_unknown_fields_rejected() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[a-z_]{1,24}", any::<i64>()), |(name, value)| {
            prop_assume!(schema::writable_field(&name).is_none());
            let mut payload = Map::new();
            payload.insert("dark_mode".to_string(), Value::from(1));
            payload.insert(name.clone(), Value::from(value));
            prop_assert_eq!(
                validate(&payload),
                Err(ValidationError::FieldNotPermitted(name))
            );
            Ok(())
        })
        .unwrap();
}

/// Ranged fields reject any non-zero value outside their bounds
#[test]
fn test_out_of_range_rejected() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop_oneof![-1000i64..200, 401i64..5000], |width| {
            prop_assume!(width != 0);
            let mut payload = Map::new();
            payload.insert("sidebar_width".to_string(), Value::from(width));
            let is_out_of_range = matches!(
                validate(&payload),
                Err(ValidationError::OutOfRange { ref field, min: 200, max: 400, .. })
                    if field == "sidebar_width"
            );
            prop_assert!(is_out_of_range);
            Ok(())
        })
        .unwrap();
}
