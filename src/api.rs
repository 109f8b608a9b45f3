//! Endpoint surface
//!
//! Request-facing wrappers over the theme service. Every endpoint returns a
//! plain result value: internal faults are logged and reported as a failure
//! message, never propagated past this boundary.

use crate::config::ApiConfig;
use crate::error::{ApiError, ValidationError};
use crate::schema::{FieldValue, SCHEMA_VERSION};
use crate::theme::{parse_payload, ThemeConfig, ThemeService};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

/// Key under which the theme is attached to the boot payload.
pub const BOOT_KEY: &str = "vitrine";

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caller {
    Guest,
    User(String),
}

impl Caller {
    pub fn user(name: impl Into<String>) -> Self {
        Caller::User(name.into())
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Caller::Guest)
    }

    /// The session user, or `Unauthorized` for guests.
    pub fn require_user(&self) -> Result<&str, ApiError> {
        match self {
            Caller::User(name) if !name.is_empty() && name != "Guest" => Ok(name),
            _ => Err(ApiError::Unauthorized(
                "authentication required".to_string(),
            )),
        }
    }
}

/// Success/failure envelope returned by write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<i64>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            field: None,
            value: None,
            dark_mode: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(message)
        }
    }
}

/// Shared payload the host attaches to every page load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BootInfo {
    #[serde(flatten)]
    pub entries: Map<String, Value>,
}

/// Cut `message` to at most `limit` characters.
pub fn truncate_message(message: &str, limit: usize) -> String {
    message.chars().take(limit).collect()
}

/// Theme endpoints.
#[derive(Clone)]
pub struct ThemeApi {
    service: ThemeService,
    limits: ApiConfig,
}

impl ThemeApi {
    pub fn new(service: ThemeService) -> Self {
        Self::with_limits(service, ApiConfig::default())
    }

    pub fn with_limits(service: ThemeService, limits: ApiConfig) -> Self {
        Self { service, limits }
    }

    pub fn service(&self) -> &ThemeService {
        &self.service
    }

    /// Read endpoint, open to guests. Always succeeds; guests get the
    /// guest-safe variant.
    pub fn get_theme_settings(&self, caller: &Caller) -> ThemeConfig {
        let config = self.service.current();
        if caller.is_guest() {
            config.guest_safe()
        } else {
            config
        }
    }

    /// Bulk write. `payload` is an object or a string holding a serialized object.
    pub fn save_theme_settings(&self, caller: &Caller, payload: &Value) -> ApiResponse {
        let result = caller.require_user().and_then(|user| {
            debug!(user, "Saving theme settings");
            let candidate = parse_payload(payload)?;
            self.service.save(&candidate)
        });
        match result {
            Ok(_) => ApiResponse::ok("Settings saved successfully"),
            Err(e) => self.failure("Theme settings save failed", e),
        }
    }

    /// Single-field write; echoes field and value on success.
    pub fn update_setting(&self, caller: &Caller, field: &str, value: &Value) -> ApiResponse {
        let result = caller
            .require_user()
            .and_then(|_| self.service.update_setting(field, value));
        match result {
            Ok((field, value, _)) => ApiResponse {
                success: true,
                message: None,
                field: Some(field.to_string()),
                value: Some(value),
                dark_mode: None,
            },
            Err(e) => self.failure("Theme setting update failed", e),
        }
    }

    pub fn reset_theme(&self, caller: &Caller) -> ApiResponse {
        match caller.require_user().and_then(|_| self.service.reset()) {
            Ok(_) => ApiResponse::ok("Theme reset to defaults"),
            Err(e) => self.failure("Theme reset failed", e),
        }
    }

    pub fn toggle_dark_mode(&self, caller: &Caller) -> ApiResponse {
        match caller
            .require_user()
            .and_then(|_| self.service.toggle_dark_mode())
        {
            Ok(enabled) => ApiResponse {
                dark_mode: Some(i64::from(enabled)),
                ..ApiResponse::ok(if enabled {
                    "Dark mode enabled"
                } else {
                    "Dark mode disabled"
                })
            },
            Err(e) => self.failure("Dark mode toggle failed", e),
        }
    }

    /// Boot hook: attach the guest-safe theme to the shared boot payload.
    pub fn extend_boot_info(&self, boot: &mut BootInfo) {
        let config = self.get_theme_settings(&Caller::Guest);
        let slug = config.color_theme_slug();
        let theme = serde_json::to_value(&config).unwrap_or_else(|e| {
            error!(error = %e, "Failed to serialize theme for boot info");
            Value::Object(Map::new())
        });
        boot.entries.insert(
            BOOT_KEY.to_string(),
            json!({
                "theme": theme,
                "color_theme_slug": slug,
                "schema_version": SCHEMA_VERSION,
            }),
        );
    }

    fn failure(&self, context: &str, err: ApiError) -> ApiResponse {
        ApiResponse::failed(failure_message(context, &err, self.limits.error_message_limit))
    }
}

/// Map an error to the caller-facing message, logging it by category.
pub(crate) fn failure_message(context: &str, err: &ApiError, limit: usize) -> String {
    match err {
        ApiError::Validation(e @ ValidationError::FieldNotPermitted(_)) => {
            warn!(error = %e, "{}", context);
            e.to_string()
        }
        ApiError::Validation(e) => {
            debug!(error = %e, "{}", context);
            e.to_string()
        }
        ApiError::Unauthorized(reason) => {
            debug!(reason = %reason, "{}", context);
            "Not permitted".to_string()
        }
        ApiError::StorageError(e) if e.is_unavailable() => {
            debug!(error = %e, "{}", context);
            "Settings not configured".to_string()
        }
        _ => {
            let message = truncate_message(&err.to_string(), limit);
            error!(error = %message, "{}", context);
            message
        }
    }
}
