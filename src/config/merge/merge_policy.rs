//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones key by key, so a workspace file that
/// only sets `api.favorites_limit` keeps every other global value.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("storage.store_path", ".vitrine/store")?
        .set_default("api.error_message_limit", 100_i64)?
        .set_default("api.kpi_error_message_limit", 200_i64)?
        .set_default("api.favorites_limit", 20_i64)
}
