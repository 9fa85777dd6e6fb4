use std::path::PathBuf;

use clap::Parser;
use mumble_online_config::{FormatterKind, MumbleOnlineConfig};

/// Keep a one-line "who is online" status file fed from a broadcast server.
#[derive(Parser, Debug)]
#[command(name = "mumble-online-indicator", version, about)]
pub struct Args {
    /// Broadcast server host.
    pub host: Option<String>,

    /// Broadcast server port.
    pub port: Option<u16>,

    /// Verbose logging.
    #[arg(short, long)]
    pub debug: bool,

    /// User names left out of every count.
    #[arg(long, num_args = 1..)]
    pub filters: Option<Vec<String>>,

    /// Status format: plain or symbol.
    #[arg(long)]
    pub formatter: Option<FormatterKind>,

    /// Status file to write.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut MumbleOnlineConfig) {
        let indicator = &mut config.indicator;
        if let Some(host) = &self.host {
            indicator.host = host.clone();
        }
        if let Some(port) = self.port {
            indicator.port = port;
        }
        if let Some(filters) = &self.filters {
            indicator.filters = filters.clone();
        }
        if let Some(formatter) = self.formatter {
            indicator.formatter = formatter;
        }
        if let Some(output) = &self.output {
            indicator.output_path = Some(output.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionals_and_flags_override_file_values() {
        let args = Args::parse_from([
            "mumble-online-indicator",
            "voice.example.org",
            "5000",
            "-d",
            "--formatter",
            "simple",
            "-o",
            "/tmp/status.txt",
            "--filters",
            "bot",
            "recorder",
        ]);
        assert!(args.debug);

        let mut config = MumbleOnlineConfig::default();
        args.apply(&mut config);
        assert_eq!(config.indicator.host, "voice.example.org");
        assert_eq!(config.indicator.port, 5000);
        assert_eq!(config.indicator.formatter, FormatterKind::Plain);
        assert_eq!(config.indicator.filters, vec!["bot", "recorder"]);
        assert_eq!(
            config.indicator.output_path.as_deref(),
            Some(std::path::Path::new("/tmp/status.txt"))
        );
    }

    #[test]
    fn no_arguments_keep_file_values() {
        let args = Args::parse_from(["mumble-online-indicator"]);
        let mut config = MumbleOnlineConfig::default();
        config.indicator.host = "example.net".into();
        args.apply(&mut config);
        assert_eq!(config.indicator.host, "example.net");
        assert_eq!(config.indicator.formatter, FormatterKind::Symbol);
        assert!(config.indicator.output_path.is_none());
    }

    #[test]
    fn unknown_formatter_is_rejected() {
        let parsed = Args::try_parse_from(["mumble-online-indicator", "--formatter", "fancy"]);
        assert!(parsed.is_err());
    }
}
