//! Per-connection handler: register, handshake, catch-up, then forward the
//! outbox to the socket until either side goes away.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::SinkExt;
use mumble_online_common::{encode_snapshot, Handshake, HandshakeField, MumbleOnlineError};
use tokio::io::AsyncReadExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio_util::codec::{FramedWrite, LinesCodec, LinesCodecError};

use crate::registry::{SubscriberRegistry, Subscription};
use crate::source::{fetch_blocking, SnapshotSource};

/// Everything a connection handler needs, shared by all connections.
pub struct ServerContext {
    pub registry: SubscriberRegistry,
    pub source: Arc<dyn SnapshotSource>,
    pub handshake: Handshake,
    pub handshake_field: HandshakeField,
}

type LineSink = FramedWrite<OwnedWriteHalf, LinesCodec>;

/// Handle a single subscriber connection.
///
/// The subscriber is deregistered on every exit path, including a failure
/// while sending the handshake.
pub async fn handle_connection(stream: TcpStream, addr: SocketAddr, ctx: Arc<ServerContext>) {
    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!(peer = %addr, error = %e, "Could not disable Nagle");
    }

    let mut subscription = ctx.registry.register();
    let id = subscription.id();
    tracing::info!(peer = %addr, subscriber = %id, "Subscriber connected");

    match serve(stream, &mut subscription, &ctx).await {
        Ok(()) => tracing::debug!(peer = %addr, subscriber = %id, "Subscriber disconnected"),
        Err(e) => tracing::debug!(
            peer = %addr,
            subscriber = %id,
            error = %e,
            "Subscriber dropped"
        ),
    }
}

async fn serve(
    stream: TcpStream,
    subscription: &mut Subscription,
    ctx: &ServerContext,
) -> Result<(), MumbleOnlineError> {
    let (mut reader, writer) = stream.into_split();
    let mut sink: LineSink = FramedWrite::new(writer, LinesCodec::new());

    // 1. Handshake, always the first line.
    send_line(&mut sink, ctx.handshake.encode(&ctx.handshake_field)).await?;

    // 2. Current state straight from the source, so a new subscriber does
    //    not wait for the next publication.
    let current = fetch_blocking(Arc::clone(&ctx.source)).await;
    send_line(&mut sink, encode_snapshot(&current)?).await?;

    // 3. Forwarding loop. Inbound bytes are ignored; they only tell us
    //    whether the peer is still there.
    let mut scratch = [0u8; 256];
    loop {
        tokio::select! {
            next = subscription.recv() => match next {
                Some(snapshot) => send_line(&mut sink, encode_snapshot(&snapshot)?).await?,
                None => return Ok(()),
            },
            read = reader.read(&mut scratch) => match read {
                Ok(0) => return Ok(()),
                Ok(_) => {}
                Err(e) => return Err(e.into()),
            },
        }
    }
}

async fn send_line(sink: &mut LineSink, line: String) -> std::io::Result<()> {
    sink.send(line).await.map_err(|e| match e {
        LinesCodecError::Io(e) => e,
        other => std::io::Error::other(other),
    })
}
