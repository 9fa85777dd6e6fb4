use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A line on the wire that could not be turned into a protocol message.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("framing error: {0}")]
    Framing(String),
}

/// Why a subscriber link to the broadcast server ended.
///
/// Every variant is recoverable: the client drops the connection, reports
/// offline and retries after its fixed delay.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    #[error("connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("no handshake within {0:?}")]
    HandshakeTimeout(Duration),

    #[error("no update within {0:?}")]
    ReadTimeout(Duration),

    #[error("connection closed before handshake")]
    ClosedBeforeHandshake,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LinkError {
    /// Short stable label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            LinkError::Connect(_) => "connect_failure",
            LinkError::ConnectTimeout(_) => "connect_timeout",
            LinkError::HandshakeTimeout(_) => "handshake_timeout",
            LinkError::ReadTimeout(_) => "read_timeout",
            LinkError::ClosedBeforeHandshake => "closed_before_handshake",
            LinkError::Protocol(_) => "protocol_error",
            LinkError::Io(_) => "io_error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MumbleOnlineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
