//! Subscriber side of mumble-online.
//!
//! [`ReconnectingClient`] keeps a connection to a broadcast server and hands
//! every observed state to a [`PresentationSink`]. [`FileStatusView`] is the
//! sink used by the binary: it keeps a one-line status file current for
//! desktop widgets to read.

pub mod client;
pub mod format;
pub mod sink;

pub use client::{ClientConfig, LinkState, ReconnectingClient};
pub use format::{StatusFormatter, OFFLINE, SERVER_DOWN};
pub use sink::{default_status_path, FileStatusView, PresentationSink, PLACEHOLDER};
