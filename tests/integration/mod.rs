//! Integration tests for the Vitrine theme settings service

mod cli_commands;
mod favorites_store;
mod kpi_dashboards;
mod lifecycle_hooks;
mod properties;
mod theme_api;
