//! Configuration schema types for mumble-online.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! The server and the indicator read the same file; each only looks at
//! its own section plus `[logging]`.

mod indicator;
mod server;
mod system;

pub use indicator::*;
pub use server::*;
pub use system::*;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MumbleOnlineConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub indicator: IndicatorConfig,
    pub logging: LoggingConfig,
}

/// Convert a validated seconds value into a `Duration`.
///
/// Values that validation would reject collapse to zero rather than panic.
pub(crate) fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or_default()
}
