//! Theme field schema
//!
//! Static FieldSpec table describing every theme setting: its category, value
//! kind, default and (for three fields) an inclusive numeric range. The table
//! is the single source of truth for resolution defaults and for the write
//! allow-list. Legacy alias names are listed separately and always mirror
//! their replacement field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bumped whenever a field is added, removed or changes default.
pub const SCHEMA_VERSION: u32 = 3;

/// Free-text override fields, withheld from guests and blanked on reset.
pub const ADVANCED_FIELDS: [&str; 2] = ["custom_css", "custom_js"];

/// Options accepted by `color_theme`.
pub const COLOR_THEMES: &[&str] = &["Purple", "Silver", "Bento Grids", "Material Web"];

/// A stored or resolved setting value.
///
/// Toggles are boolean-like integers (0/1), matching how the settings record
/// has always stored them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    /// Non-zero integers and non-empty text are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Int(v) => *v != 0,
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Int(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Settings form section a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    General,
    Header,
    Body,
    Sidebar,
    Footer,
    Typography,
    Colors,
    Advanced,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Header => "Header",
            Category::Body => "Body/Glass",
            Category::Sidebar => "Sidebar",
            Category::Footer => "Footer",
            Category::Typography => "Typography",
            Category::Colors => "Colors",
            Category::Advanced => "Advanced",
        }
    }
}

/// Value kind, used to coerce incoming payload values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 0/1 toggle
    Check,
    Int,
    Text,
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
    Color,
    Select(&'static [&'static str]),
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Check => "check",
            FieldKind::Int => "int",
            FieldKind::Text => "text",
            FieldKind::Color => "color",
            FieldKind::Select(_) => "select",
        }
    }
}

/// Compile-time default for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Int(i64),
    Text(&'static str),
}

/// One row of the field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Human label used in validation messages
    pub label: &'static str,
    pub category: Category,
    pub kind: FieldKind,
    pub default: DefaultValue,
    /// Inclusive range, checked only for non-zero values
    pub range: Option<(i64, i64)>,
}

impl FieldSpec {
    pub fn default_value(&self) -> FieldValue {
        match self.default {
            DefaultValue::Int(v) => FieldValue::Int(v),
            DefaultValue::Text(s) => FieldValue::Text(s.to_string()),
        }
    }
}

/// Old field name kept for clients that predate the header/body split.
#[derive(Debug, Clone, Copy)]
pub struct LegacyAlias {
    pub alias: &'static str,
    pub target: &'static str,
}

const fn spec(
    name: &'static str,
    label: &'static str,
    category: Category,
    kind: FieldKind,
    default: DefaultValue,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        category,
        kind,
        default,
        range: None,
    }
}

const fn ranged(
    name: &'static str,
    label: &'static str,
    category: Category,
    default: i64,
    min: i64,
    max: i64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        category,
        kind: FieldKind::Int,
        default: DefaultValue::Int(default),
        range: Some((min, max)),
    }
}

use Category as C;
use DefaultValue::{Int as I, Text as T};
use FieldKind as K;

pub static FIELDS: &[FieldSpec] = &[
    // General
    spec("enable_theme", "Enable Theme", C::General, K::Check, I(1)),
    spec("color_theme", "Color Theme", C::General, K::Select(COLOR_THEMES), T("Silver")),
    spec("dark_mode", "Dark Mode", C::General, K::Check, I(0)),
    spec("enable_animations", "Enable Animations", C::General, K::Check, I(1)),
    spec("animation_speed", "Animation Speed", C::General, K::Select(&["Slow", "Normal", "Fast"]), T("Normal")),
    // Header
    spec("header_style", "Header Style", C::Header, K::Text, T("Gradient")),
    spec("header_gradient_start", "Header Gradient Start", C::Header, K::Color, T("#7c3aed")),
    spec("header_gradient_end", "Header Gradient End", C::Header, K::Color, T("#3b82f6")),
    spec("header_blur", "Header Blur", C::Header, K::Int, I(30)),
    spec("show_custom_logo", "Show Custom Logo", C::Header, K::Check, I(0)),
    spec("custom_logo", "Custom Logo", C::Header, K::Text, T("")),
    // Body / glass
    spec("body_gradient_start", "Body Gradient Start", C::Body, K::Color, T("#667eea")),
    spec("body_gradient_middle", "Body Gradient Middle", C::Body, K::Color, T("#764ba2")),
    spec("body_gradient_end", "Body Gradient End", C::Body, K::Color, T("#f093fb")),
    spec("enable_glassmorphism", "Enable Glassmorphism", C::Body, K::Check, I(1)),
    ranged("glass_blur", "Glass Blur", C::Body, 20, 0, 100),
    ranged("glass_opacity", "Glass Opacity", C::Body, 72, 0, 100),
    // Sidebar
    spec("sidebar_style", "Sidebar Style", C::Sidebar, K::Text, T("Glass")),
    spec("sidebar_gradient_start", "Sidebar Gradient Start", C::Sidebar, K::Color, T("#1e1e2e")),
    spec("sidebar_gradient_end", "Sidebar Gradient End", C::Sidebar, K::Color, T("#2d2d3f")),
    ranged("sidebar_width", "Sidebar Width", C::Sidebar, 260, 200, 400),
    spec("sidebar_blur", "Sidebar Blur", C::Sidebar, K::Int, I(20)),
    spec("sidebar_position", "Sidebar Position", C::Sidebar, K::Select(&["Left", "Right"]), T("Left")),
    // Footer
    spec("footer_style", "Footer Style", C::Footer, K::Text, T("Gradient")),
    spec("footer_gradient_start", "Footer Gradient Start", C::Footer, K::Color, T("#1e1e2e")),
    spec("footer_gradient_end", "Footer Gradient End", C::Footer, K::Color, T("#2d2d3f")),
    spec("show_footer", "Show Footer", C::Footer, K::Check, I(1)),
    // Typography
    spec("font_family", "Font Family", C::Typography, K::Text, T("Cairo")),
    spec("font_size_base", "Base Font Size", C::Typography, K::Int, I(14)),
    spec("arabic_font", "Arabic Font", C::Typography, K::Text, T("Cairo")),
    spec("enable_custom_fonts", "Enable Custom Fonts", C::Typography, K::Check, I(1)),
    // Colors
    spec("primary_color", "Primary Color", C::Colors, K::Color, T("#7c3aed")),
    spec("secondary_color", "Secondary Color", C::Colors, K::Color, T("#3b82f6")),
    // Advanced
    spec("custom_css", "Custom CSS", C::Advanced, K::Text, T("")),
    spec("custom_js", "Custom JS", C::Advanced, K::Text, T("")),
];

pub static LEGACY_ALIASES: &[LegacyAlias] = &[
    LegacyAlias { alias: "navbar_style", target: "header_style" },
    LegacyAlias { alias: "navbar_blur", target: "header_blur" },
    LegacyAlias { alias: "gradient_start", target: "body_gradient_start" },
    LegacyAlias { alias: "gradient_end", target: "body_gradient_middle" },
];

/// Look up a current (non-alias) field.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Replacement field for a legacy alias name.
pub fn alias_target(name: &str) -> Option<&'static str> {
    LEGACY_ALIASES
        .iter()
        .find(|a| a.alias == name)
        .map(|a| a.target)
}

/// Resolve a writable name (current field or legacy alias) to its FieldSpec.
///
/// Returns `None` for names outside the allow-list.
pub fn writable_field(name: &str) -> Option<&'static FieldSpec> {
    field(name).or_else(|| alias_target(name).and_then(field))
}

/// Every name a write may touch: current fields followed by legacy aliases.
pub fn allow_list() -> impl Iterator<Item = &'static str> {
    FIELDS
        .iter()
        .map(|f| f.name)
        .chain(LEGACY_ALIASES.iter().map(|a| a.alias))
}

/// Stylesheet slug for a color theme display name ("Bento Grids" -> "bento-grids").
pub fn color_theme_slug(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
