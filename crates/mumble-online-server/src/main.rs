//! mumble-online-server: polls the voice server and broadcasts who is
//! connected to every subscriber.

mod cli;

use std::sync::Arc;

use mumble_online_common::MumbleOnlineError;
use mumble_online_config::validation;
use mumble_online_server::{CommandSource, OfflineSource, Server, SnapshotSource};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), MumbleOnlineError> {
    let args = cli::parse();

    let mut config = mumble_online_config::load_config(args.config.as_deref())?;
    args.apply(&mut config);

    let level = if args.debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                format!("mumble_online={level}")
                    .parse()
                    .unwrap_or_else(|_| "mumble_online=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("mumble-online-server v{} starting", env!("CARGO_PKG_VERSION"));
    validation::validate_server(&config)?;

    let source: Arc<dyn SnapshotSource> = match CommandSource::from_argv(&config.source.command) {
        Some(command) => Arc::new(command),
        None => {
            tracing::warn!("No source command configured, every snapshot will report the server down");
            Arc::new(OfflineSource)
        }
    };

    let server = Server::bind(&config.server, source).await?;
    tracing::info!(
        "Listening for connections on {}",
        server.local_addr()?
    );

    tokio::select! {
        _ = server.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }
    Ok(())
}
