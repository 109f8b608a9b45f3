//! Command-name contract for logging.

use crate::cli::parse::{Commands, FavoritesCommands, ThemeCommands};

/// Dotted command name (e.g. "theme.set", "favorites.add").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Install => "install".to_string(),
        Commands::Migrate => "migrate".to_string(),
        Commands::Uninstall { .. } => "uninstall".to_string(),
        Commands::Theme { command } => format!("theme.{}", theme_command_name(command)),
        Commands::Favorites { command } => {
            format!("favorites.{}", favorites_command_name(command))
        }
        Commands::Kpi { .. } => "kpi".to_string(),
    }
}

pub fn theme_command_name(command: &ThemeCommands) -> &'static str {
    match command {
        ThemeCommands::Show { .. } => "show",
        ThemeCommands::Fields { .. } => "fields",
        ThemeCommands::Set { .. } => "set",
        ThemeCommands::Save { .. } => "save",
        ThemeCommands::Reset { .. } => "reset",
        ThemeCommands::ToggleDark => "toggle_dark",
    }
}

pub fn favorites_command_name(command: &FavoritesCommands) -> &'static str {
    match command {
        FavoritesCommands::List { .. } => "list",
        FavoritesCommands::Add { .. } => "add",
        FavoritesCommands::Remove { .. } => "remove",
    }
}
