//! Workspace config files: `config/config.toml`, then `config/{VITRINE_ENV}.toml`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment layer used when `VITRINE_ENV` is unset.
const DEFAULT_ENV: &str = "development";

/// Workspace config files in the order they are layered; missing files are skipped.
pub fn layer_paths(workspace_root: &Path) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    let env_name = std::env::var("VITRINE_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}

/// Add the workspace layers to `builder`; later layers win key by key.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for path in layer_paths(workspace_root) {
        debug!(config_path = %path.display(), "Loading workspace configuration");
        builder = builder.add_source(File::from(path).required(false));
    }
    Ok(builder)
}
