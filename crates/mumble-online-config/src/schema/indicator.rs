//! Indicator (subscriber) configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use mumble_online_common::HandshakeField;
use serde::{Deserialize, Serialize};

use super::{secs, DEFAULT_PORT};

/// How the indicator renders a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// `Online: 3/5`
    #[serde(alias = "simple")]
    Plain,
    /// `✔️ 3 | 🕘 2`
    #[default]
    #[serde(alias = "emoji")]
    Symbol,
}

impl FormatterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatterKind::Plain => "plain",
            FormatterKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown formatter '{0}' (expected plain or symbol)")]
pub struct UnknownFormatter(String);

impl FromStr for FormatterKind {
    type Err = UnknownFormatter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "simple" => Ok(FormatterKind::Plain),
            "symbol" | "emoji" => Ok(FormatterKind::Symbol),
            _ => Err(UnknownFormatter(s.to_string())),
        }
    }
}

/// Indicator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub host: String,
    pub port: u16,
    /// User names excluded from every count.
    pub filters: Vec<String>,
    pub formatter: FormatterKind,
    /// Seconds allowed for connecting and for receiving the handshake.
    pub connect_timeout: f64,
    /// Seconds added to the server's keep-alive bound before giving up on a read.
    pub read_margin: f64,
    /// Seconds to wait between two connection attempts.
    pub retry_delay: f64,
    pub handshake_field: HandshakeField,
    /// Status file; defaults to `$XDG_RUNTIME_DIR/mumble-online-users.txt`.
    pub output_path: Option<PathBuf>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: DEFAULT_PORT,
            filters: Vec::new(),
            formatter: FormatterKind::Symbol,
            connect_timeout: 30.0,
            read_margin: 5.0,
            retry_delay: 3.0,
            handshake_field: HandshakeField::default(),
            output_path: None,
        }
    }
}

impl IndicatorConfig {
    pub fn connect_timeout(&self) -> Duration {
        secs(self.connect_timeout)
    }

    pub fn read_margin(&self) -> Duration {
        secs(self.read_margin)
    }

    pub fn retry_delay(&self) -> Duration {
        secs(self.retry_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatter_from_str_accepts_legacy_names() {
        assert_eq!("plain".parse::<FormatterKind>().unwrap(), FormatterKind::Plain);
        assert_eq!("simple".parse::<FormatterKind>().unwrap(), FormatterKind::Plain);
        assert_eq!("Symbol".parse::<FormatterKind>().unwrap(), FormatterKind::Symbol);
        assert_eq!("emoji".parse::<FormatterKind>().unwrap(), FormatterKind::Symbol);
        assert!("fancy".parse::<FormatterKind>().is_err());
    }

    #[test]
    fn formatter_deserializes_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            formatter: FormatterKind,
        }
        let w: Wrapper = toml::from_str(r#"formatter = "emoji""#).unwrap();
        assert_eq!(w.formatter, FormatterKind::Symbol);
        let w: Wrapper = toml::from_str(r#"formatter = "plain""#).unwrap();
        assert_eq!(w.formatter, FormatterKind::Plain);
    }

    #[test]
    fn default_durations() {
        let config = IndicatorConfig::default();
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.read_margin(), Duration::from_secs(5));
        assert_eq!(config.retry_delay(), Duration::from_secs(3));
    }
}
