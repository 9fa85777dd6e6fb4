//! mumble-online-indicator: subscribes to a broadcast server and keeps a
//! status file for panel widgets.

mod cli;

use mumble_online_common::MumbleOnlineError;
use mumble_online_config::validation;
use mumble_online_indicator::{
    default_status_path, ClientConfig, FileStatusView, ReconnectingClient, StatusFormatter,
};
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

    tracing::info!("mumble-online-indicator v{} starting", env!("CARGO_PKG_VERSION"));
    validation::validate_indicator(&config)?;

    let indicator = &config.indicator;
    let path = indicator
        .output_path
        .clone()
        .unwrap_or_else(default_status_path);
    let formatter = StatusFormatter::new(indicator.formatter, indicator.filters.iter().cloned());
    let view = FileStatusView::open(&path, formatter)?;
    tracing::info!(
        path = %path.display(),
        server = %format!("{}:{}", indicator.host, indicator.port),
        "Writing status"
    );

    let mut client = ReconnectingClient::new(ClientConfig::from(indicator), view);
    tokio::select! {
        _ = client.run() => {}
        _ = shutdown_signal() => {
            tracing::info!("Shutting down");
        }
    }

    client.into_sink().close()?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for SIGTERM");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
