//! Types shared by the mumble-online broadcast server and indicator client.

pub mod errors;
pub mod protocol;
pub mod snapshot;

pub use errors::{ConfigError, LinkError, MumbleOnlineError, ProtocolError};
pub use protocol::{decode_snapshot, encode_snapshot, Handshake, HandshakeField, MAX_LINE_LENGTH};
pub use snapshot::{Snapshot, Tally, User, UserStatus};

pub type Result<T> = std::result::Result<T, MumbleOnlineError>;
