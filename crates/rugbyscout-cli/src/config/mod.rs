//! Application configuration module.
//!
//! Manages the TOML config file holding endpoints, feeds, the channel
//! seed list, transport settings and per-command day windows.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, resolve_config_path};
