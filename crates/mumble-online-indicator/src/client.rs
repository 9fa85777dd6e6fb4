//! Reconnecting subscriber: one connection at a time, retried forever.
//!
//! Every blocking step (connect, handshake, each read) carries its own
//! deadline. Expiry, I/O errors, malformed lines and a clean close all end
//! the connection the same way: report offline, wait, reconnect.

use std::time::Duration;

use futures_util::StreamExt;
use mumble_online_common::{
    decode_snapshot, Handshake, HandshakeField, LinkError, ProtocolError, Snapshot,
    MAX_LINE_LENGTH,
};
use mumble_online_config::IndicatorConfig;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

use crate::sink::PresentationSink;

type LineStream = FramedRead<TcpStream, LinesCodec>;

/// Connection settings for the indicator.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Deadline for connecting and for receiving the handshake.
    pub connect_timeout: Duration,
    /// Slack added to the server's keep-alive bound before a read times out.
    pub read_margin: Duration,
    /// Fixed pause between two connection attempts.
    pub retry_delay: Duration,
    pub handshake_field: HandshakeField,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from(&IndicatorConfig::default())
    }
}

impl From<&IndicatorConfig> for ClientConfig {
    fn from(config: &IndicatorConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            connect_timeout: config.connect_timeout(),
            read_margin: config.read_margin(),
            retry_delay: config.retry_delay(),
            handshake_field: config.handshake_field.clone(),
        }
    }
}

/// Where the client is in its connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    AwaitingHandshake,
    Streaming,
}

pub struct ReconnectingClient<S> {
    config: ClientConfig,
    sink: S,
    state: LinkState,
}

impl<S: PresentationSink> ReconnectingClient<S> {
    pub fn new(config: ClientConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            state: LinkState::Disconnected,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Connect, stream and reconnect forever.
    pub async fn run(&mut self) {
        self.emit(None);
        loop {
            match self.run_once().await {
                Ok(()) => tracing::info!("Server closed the connection"),
                Err(e) => tracing::info!(kind = e.label(), error = %e, "Connection lost"),
            }
            tracing::debug!(delay = ?self.config.retry_delay, "Retrying");
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }

    /// One connection attempt, streamed until it ends.
    ///
    /// Offline is reported before returning, whatever the outcome.
    pub async fn run_once(&mut self) -> Result<(), LinkError> {
        let outcome = self.stream().await;
        self.transition(LinkState::Disconnected);
        self.emit(None);
        outcome
    }

    async fn stream(&mut self) -> Result<(), LinkError> {
        self.transition(LinkState::Connecting);
        let connect_timeout = self.config.connect_timeout;
        let addr = (self.config.host.as_str(), self.config.port);
        let stream = match timeout(connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(LinkError::Connect(e)),
            Err(_) => return Err(LinkError::ConnectTimeout(connect_timeout)),
        };
        tracing::debug!(host = %self.config.host, port = self.config.port, "Connected");

        let mut lines = FramedRead::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

        self.transition(LinkState::AwaitingHandshake);
        let line = timeout(connect_timeout, next_line(&mut lines))
            .await
            .map_err(|_| LinkError::HandshakeTimeout(connect_timeout))??
            .ok_or(LinkError::ClosedBeforeHandshake)?;
        let handshake = Handshake::decode(&line, &self.config.handshake_field)?;
        let read_timeout = handshake.max_interval + self.config.read_margin;
        tracing::debug!(
            max_interval = ?handshake.max_interval,
            read_timeout = ?read_timeout,
            "Received handshake"
        );

        self.transition(LinkState::Streaming);
        loop {
            let line = timeout(read_timeout, next_line(&mut lines))
                .await
                .map_err(|_| LinkError::ReadTimeout(read_timeout))??;
            let Some(line) = line else {
                return Ok(());
            };
            // A blank line is malformed like any other undecodable line.
            let snapshot = decode_snapshot(&line)?;
            tracing::trace!(?snapshot, "Received snapshot");
            self.emit(Some(&snapshot));
        }
    }

    fn transition(&mut self, next: LinkState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "Link state");
            self.state = next;
        }
    }

    fn emit(&mut self, state: Option<&Snapshot>) {
        if let Err(e) = self.sink.update(state) {
            tracing::warn!(error = %e, "Failed to update status");
        }
    }
}

/// Next line from the server; `None` once it closed the connection.
async fn next_line(lines: &mut LineStream) -> Result<Option<String>, LinkError> {
    match lines.next().await {
        None => Ok(None),
        Some(Ok(line)) => Ok(Some(line)),
        Some(Err(LinesCodecError::Io(e))) => Err(LinkError::Io(e)),
        Some(Err(LinesCodecError::MaxLineLengthExceeded)) => Err(ProtocolError::Framing(
            format!("line longer than {MAX_LINE_LENGTH} bytes"),
        )
        .into()),
    }
}
