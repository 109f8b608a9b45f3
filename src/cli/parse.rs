//! CLI parse: clap types for Vitrine. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vitrine CLI - theme settings and dashboard helpers
#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Theme settings resolution, validation and dashboard helpers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Session user for authenticated commands
    #[arg(long, default_value = "Administrator")]
    pub user: String,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the settings schema and default record
    Install,
    /// Upgrade the stored record to the current schema
    Migrate,
    /// Remove the settings schema and record
    Uninstall {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Theme settings
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Per-user favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Show KPI cards for a workspace
    Kpi {
        /// Workspace name (finance, sales, ... or a legacy module name)
        workspace: String,
        /// Figures file (.json or .toml)
        #[arg(long)]
        figures: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the resolved theme configuration
    Show {
        /// Show what unauthenticated callers receive
        #[arg(long)]
        guest: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List every writable field
    Fields {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Update one field
    Set {
        /// Field name (legacy names accepted)
        field: String,
        /// New value; parsed as JSON when possible, else taken as text
        value: String,
    },
    /// Save several fields from a JSON object
    Save {
        /// JSON object, e.g. '{"dark_mode": 1}'
        payload: String,
    },
    /// Restore every field to its default
    Reset {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Flip dark mode
    ToggleDark,
}

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List the user's favorites
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add a favorite
    Add {
        /// Target: a DocType name, report, page or URL
        target: String,
        /// Display label (defaults to the target)
        #[arg(long, default_value = "")]
        label: String,
        /// Shortcut type: doctype, report, page, url
        #[arg(long = "type", default_value = "doctype")]
        shortcut_type: String,
        /// Explicit route
        #[arg(long)]
        route: Option<String>,
    },
    /// Remove a favorite
    Remove {
        /// Target as given when added
        target: String,
    },
}
