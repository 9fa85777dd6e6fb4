//! mumble-online configuration system.
//!
//! Provides TOML-based configuration shared by the broadcast server and the
//! indicator. All sections use sensible defaults so partial configs work
//! out of the box; command-line flags are applied on top by the binaries.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mumble_online_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("polling every {:?}", config.server.poll_interval());
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    FormatterKind, IndicatorConfig, LogLevel, LoggingConfig, MumbleOnlineConfig, ServerConfig,
    SourceConfig, CONFIG_SCHEMA_VERSION, DEFAULT_PORT,
};

use std::path::Path;

use mumble_online_common::ConfigError;

/// Load the config file.
///
/// An explicit `path` must exist. Without one, the platform default path is
/// used and a commented default file is created there if missing.
pub fn load_config(path: Option<&Path>) -> Result<MumbleOnlineConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
