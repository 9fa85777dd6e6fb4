//! TCP accept loop. One task per subscriber; nothing a subscriber does can
//! take the listener down.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, ToSocketAddrs};

use crate::connection::{handle_connection, ServerContext};

const ACCEPT_BACKOFF_MIN: Duration = Duration::from_millis(10);
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Pause after `consecutive` failed accepts in a row, doubling up to a cap.
fn accept_backoff(consecutive: u32) -> Duration {
    let factor = 1u32 << consecutive.saturating_sub(1).min(10);
    (ACCEPT_BACKOFF_MIN * factor).min(ACCEPT_BACKOFF_MAX)
}

pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    pub async fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let inner = TcpListener::bind(addr).await?;
        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Accept connections forever.
    pub async fn serve(self, ctx: Arc<ServerContext>) {
        let mut failures = 0u32;
        loop {
            match self.inner.accept().await {
                Ok((stream, addr)) => {
                    failures = 0;
                    let ctx = Arc::clone(&ctx);
                    tokio::spawn(handle_connection(stream, addr, ctx));
                }
                Err(e) => {
                    // EMFILE and friends persist; don't spin on them.
                    failures = failures.saturating_add(1);
                    let delay = accept_backoff(failures);
                    tracing::warn!(error = %e, retry_in = ?delay, "TCP accept error");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
