//! mumble-online broadcast server.
//!
//! Polls a snapshot source on a fixed cadence and streams presence
//! snapshots to any number of TCP subscribers over a newline-delimited JSON
//! protocol. Unchanged snapshots are suppressed, but every subscriber hears
//! from the server at least once per keep-alive interval.

pub mod connection;
pub mod listener;
pub mod poller;
pub mod registry;
pub mod source;

pub use connection::{handle_connection, ServerContext};
pub use listener::Listener;
pub use poller::{Poller, Throttle};
pub use registry::{SubscriberId, SubscriberRegistry, Subscription};
pub use source::{CommandSource, MurmurUser, OfflineSource, SnapshotSource};

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use mumble_online_common::Handshake;
use mumble_online_config::ServerConfig;

/// A bound server: listener, poller and the state they share.
pub struct Server {
    listener: Listener,
    poller: Poller,
    ctx: Arc<ServerContext>,
}

impl Server {
    /// Bind the listening socket. Failing to bind is the one fatal error.
    pub async fn bind(config: &ServerConfig, source: Arc<dyn SnapshotSource>) -> io::Result<Self> {
        let listener = Listener::bind((config.host.as_str(), config.port)).await?;
        let registry = SubscriberRegistry::new();

        let poller = Poller::new(
            Arc::clone(&source),
            registry.clone(),
            config.poll_interval(),
            config.max_interval(),
        );
        let ctx = Arc::new(ServerContext {
            registry,
            source,
            handshake: Handshake::new(config.max_interval()),
            handshake_field: config.handshake_field.clone(),
        });

        Ok(Self {
            listener,
            poller,
            ctx,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn registry(&self) -> &SubscriberRegistry {
        &self.ctx.registry
    }

    /// Run the poller on its own task and the accept loop on this one,
    /// until this future is dropped.
    pub async fn run(self) {
        let _poller = AbortOnDrop(tokio::spawn(self.poller.run()));
        self.listener.serve(self.ctx).await;
    }
}

struct AbortOnDrop(tokio::task::JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
