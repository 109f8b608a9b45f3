//! Vitrine: theme settings resolution for ERP front-ends
//!
//! Resolves a possibly partial, possibly absent theme settings record into a
//! complete configuration, validates writes against a static field schema and
//! serves both through guest-aware endpoints. Also carries the dashboard KPI
//! card builders and per-user favorites.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorites;
pub mod kpi;
pub mod lifecycle;
pub mod logging;
pub mod schema;
pub mod store;
pub mod theme;
