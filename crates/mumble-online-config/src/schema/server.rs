//! Broadcast server and snapshot source configuration.

use std::time::Duration;

use mumble_online_common::HandshakeField;
use serde::{Deserialize, Serialize};

use super::secs;

/// Default TCP port shared by the server and the indicator.
pub const DEFAULT_PORT: u16 = 43223;

/// Broadcast server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening address (`::` accepts IPv4 and IPv6 on dual-stack hosts).
    pub host: String,
    pub port: u16,
    /// Seconds between two polls of the snapshot source.
    pub poll_interval: f64,
    /// Longest a subscriber may go without any push, in seconds.
    pub max_interval: f64,
    pub handshake_field: HandshakeField,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "::".into(),
            port: DEFAULT_PORT,
            poll_interval: 0.5,
            max_interval: 30.0,
            handshake_field: HandshakeField::default(),
        }
    }
}

impl ServerConfig {
    pub fn poll_interval(&self) -> Duration {
        secs(self.poll_interval)
    }

    pub fn max_interval(&self) -> Duration {
        secs(self.max_interval)
    }
}

/// Where presence snapshots come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Program and arguments printing the voice server's users as JSON.
    /// Empty means no control plane is configured.
    pub command: Vec<String>,
}
