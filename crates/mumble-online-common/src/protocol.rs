//! Line protocol between the broadcast server and its subscribers.
//!
//! One UTF-8 JSON object per line. The server always opens with a handshake
//! carrying the keep-alive bound, then streams snapshots:
//!
//! ```text
//! {"params": {"max_interval": 30.0}}
//! {"users": {"12": {"name": "alice"}, "15": {"name": "bob", "status": "mute"}}}
//! {"error": true}
//! ```
//!
//! Line splitting itself is left to `tokio_util::codec::LinesCodec`; this
//! module only deals with the payload of a single line.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;
use crate::snapshot::Snapshot;

/// Longest line either side will accept.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Name of the handshake field carrying the keep-alive bound.
///
/// Earlier protocol generations called it `max_skip_time`; the canonical name
/// is `max_interval`. Both ends must agree, there is no fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandshakeField(String);

impl HandshakeField {
    pub const CANONICAL: &'static str = "max_interval";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HandshakeField {
    fn default() -> Self {
        Self::new(Self::CANONICAL)
    }
}

impl fmt::Display for HandshakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session parameters sent once, first, on every connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handshake {
    /// Longest the server will stay silent towards a subscriber.
    pub max_interval: Duration,
}

impl Handshake {
    pub fn new(max_interval: Duration) -> Self {
        Self { max_interval }
    }

    /// Encode as a single line (without the terminator).
    pub fn encode(&self, field: &HandshakeField) -> String {
        let mut params = serde_json::Map::new();
        params.insert(
            field.as_str().to_string(),
            serde_json::Value::from(self.max_interval.as_secs_f64()),
        );
        serde_json::json!({ "params": params }).to_string()
    }

    pub fn decode(line: &str, field: &HandshakeField) -> Result<Self, ProtocolError> {
        let value: serde_json::Value = serde_json::from_str(line)?;
        let params = value
            .get("params")
            .ok_or_else(|| ProtocolError::MissingField("params".into()))?;
        let raw = params
            .get(field.as_str())
            .ok_or_else(|| ProtocolError::MissingField(format!("params.{field}")))?;
        let secs = raw
            .as_f64()
            .ok_or_else(|| ProtocolError::InvalidInterval(format!("{field} = {raw}")))?;
        let max_interval = Duration::try_from_secs_f64(secs)
            .map_err(|e| ProtocolError::InvalidInterval(format!("{field} = {secs}: {e}")))?;
        Ok(Self { max_interval })
    }
}

/// Encode a snapshot as a single line (without the terminator).
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(snapshot)?)
}

pub fn decode_snapshot(line: &str) -> Result<Snapshot, ProtocolError> {
    Ok(serde_json::from_str(line)?)
}
