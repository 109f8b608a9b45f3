//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::api::{Caller, ThemeApi};
use crate::config::{ConfigLoader, VitrineConfig};
use crate::error::{ApiError, StorageError};
use crate::favorites::{FavoritesApi, FavoritesStore, ShortcutType};
use crate::kpi::{KpiApi, KpiSnapshot};
use crate::lifecycle;
use crate::store::SledSettingsStore;
use crate::theme::ThemeService;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cli::command_name;
use crate::cli::parse::{Commands, FavoritesCommands, ThemeCommands};
use crate::cli::presentation::{
    format_favorites_json, format_favorites_text, format_fields_json, format_fields_text,
    format_kpi_cards_json, format_kpi_cards_text, format_lifecycle_outcome, format_response,
    format_theme_json, format_theme_text,
};

/// Runtime context for CLI execution: workspace, store and endpoint facades.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    db: sled::Db,
    theme: ThemeApi,
    favorites: FavoritesApi,
    kpis: KpiApi,
    caller: Caller,
    store_path: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root, optional config path and session user.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        user: &str,
    ) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::from_config(&workspace_root, &config, user)
    }

    pub fn from_config(
        workspace_root: &Path,
        config: &VitrineConfig,
        user: &str,
    ) -> Result<Self, ApiError> {
        let store_path = config.storage.resolve_path(workspace_root);
        std::fs::create_dir_all(&store_path)
            .map_err(|e| ApiError::StorageError(StorageError::IoError(e)))?;

        let db = sled::open(&store_path).map_err(|e| {
            ApiError::StorageError(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            )))
        })?;
        let settings = Arc::new(SledSettingsStore::from_db(db.clone())?);
        let favorites = FavoritesStore::from_db(db.clone())?;

        let theme = ThemeApi::with_limits(ThemeService::new(settings), config.api.clone());
        let favorites = FavoritesApi::with_limits(favorites, config.api.clone());
        let kpis = KpiApi::with_limits(config.api.clone());

        Ok(Self {
            db,
            theme,
            favorites,
            kpis,
            caller: Caller::user(user),
            store_path,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        debug!(command = %name, store = %self.store_path.display(), "Executing command");
        let result = self.execute_inner(command);
        self.db
            .flush()
            .map_err(|e| ApiError::StorageError(crate::store::persistence::to_storage_io(e)))?;
        if result.is_ok() {
            info!(command = %name, "Command finished");
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        let service = self.theme.service();
        match command {
            Commands::Install => {
                format_lifecycle_outcome("install", &lifecycle::after_install(service))
            }
            Commands::Migrate => {
                format_lifecycle_outcome("migrate", &lifecycle::after_migrate(service))
            }
            Commands::Uninstall { force } => {
                if !force && !confirm("Remove theme settings and their schema?")? {
                    return Ok("Uninstall cancelled".to_string());
                }
                format_lifecycle_outcome("uninstall", &lifecycle::after_uninstall(service))
            }
            Commands::Theme { command } => self.handle_theme_command(command),
            Commands::Favorites { command } => self.handle_favorites_command(command),
            Commands::Kpi {
                workspace,
                figures,
                format,
            } => {
                let snapshot = KpiSnapshot::load(figures)?;
                let cards = self.kpis.get_workspace_kpis(&snapshot, workspace);
                if format == "json" {
                    format_kpi_cards_json(&cards)
                } else {
                    Ok(format_kpi_cards_text(workspace, &cards))
                }
            }
        }
    }

    fn handle_theme_command(&self, command: &ThemeCommands) -> Result<String, ApiError> {
        match command {
            ThemeCommands::Show { guest, format } => {
                let guest_caller = Caller::Guest;
                let caller = if *guest { &guest_caller } else { &self.caller };
                let config = self.theme.get_theme_settings(caller);
                if format == "json" {
                    format_theme_json(&config)
                } else {
                    Ok(format_theme_text(&config, caller.is_guest()))
                }
            }
            ThemeCommands::Fields { format } => {
                if format == "json" {
                    format_fields_json()
                } else {
                    Ok(format_fields_text())
                }
            }
            ThemeCommands::Set { field, value } => {
                let value = parse_cli_value(value);
                format_response(&self.theme.update_setting(&self.caller, field, &value))
            }
            ThemeCommands::Save { payload } => {
                let payload = Value::String(payload.clone());
                format_response(&self.theme.save_theme_settings(&self.caller, &payload))
            }
            ThemeCommands::Reset { force } => {
                if !force && !confirm("Reset every theme setting to its default?")? {
                    return Ok("Reset cancelled".to_string());
                }
                format_response(&self.theme.reset_theme(&self.caller))
            }
            ThemeCommands::ToggleDark => {
                format_response(&self.theme.toggle_dark_mode(&self.caller))
            }
        }
    }

    fn handle_favorites_command(&self, command: &FavoritesCommands) -> Result<String, ApiError> {
        match command {
            FavoritesCommands::List { format } => {
                let favorites = self.favorites.get_user_favorites(&self.caller);
                if format == "json" {
                    format_favorites_json(&favorites)
                } else {
                    let user = self.caller.require_user().unwrap_or("Guest");
                    Ok(format_favorites_text(user, &favorites))
                }
            }
            FavoritesCommands::Add {
                target,
                label,
                shortcut_type,
                route,
            } => {
                let kind = ShortcutType::parse(shortcut_type).ok_or_else(|| {
                    ApiError::Rejected(format!(
                        "Unknown shortcut type '{}' (expected doctype, report, page or url)",
                        shortcut_type
                    ))
                })?;
                format_response(&self.favorites.add_shortcut(
                    &self.caller,
                    target,
                    label,
                    kind,
                    route.as_deref(),
                ))
            }
            FavoritesCommands::Remove { target } => {
                format_response(&self.favorites.remove_from_favorites(&self.caller, target))
            }
        }
    }
}

/// JSON when it parses (`300`, `true`, `null`), plain text otherwise.
fn parse_cli_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn confirm(prompt: &str) -> Result<bool, ApiError> {
    use dialoguer::Confirm;
    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))
}
