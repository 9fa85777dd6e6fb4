use std::path::PathBuf;

use clap::Parser;
use mumble_online_config::MumbleOnlineConfig;

/// Broadcast the voice server's connected users to TCP subscribers.
#[derive(Parser, Debug)]
#[command(name = "mumble-online-server", version, about)]
pub struct Args {
    /// Listening address.
    #[arg(short = 'l', long)]
    pub host: Option<String>,

    /// Listening port.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Interval between polls, in seconds.
    #[arg(short, long)]
    pub interval: Option<f64>,

    /// Maximum interval in seconds between updates (keep-alive interval).
    #[arg(long = "max")]
    pub max_interval: Option<f64>,

    /// Program (and arguments) printing the voice server's users as JSON.
    #[arg(long, num_args = 1.., allow_hyphen_values = true)]
    pub source_command: Option<Vec<String>>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Apply command-line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut MumbleOnlineConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(interval) = self.interval {
            config.server.poll_interval = interval;
        }
        if let Some(max) = self.max_interval {
            config.server.max_interval = max;
        }
        if let Some(command) = &self.source_command {
            config.source.command = command.clone();
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
