//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB credentials, endpoints and
//! browser preferences.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig, TmdbConfig};
pub use paths::resolve_config_path;
