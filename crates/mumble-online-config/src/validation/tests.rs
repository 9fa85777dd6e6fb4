//! Tests for configuration validation.

use super::*;
use crate::schema::MumbleOnlineConfig;

#[test]
fn default_config_is_valid() {
    let config = MumbleOnlineConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn zero_poll_interval_is_rejected() {
    let mut config = MumbleOnlineConfig::default();
    config.server.poll_interval = 0.0;
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("server.poll_interval"));
}

#[test]
fn sub_millisecond_poll_interval_is_rejected() {
    let mut config = MumbleOnlineConfig::default();
    config.server.poll_interval = 1e-10;
    config.server.max_interval = 1.0;
    let err = validate_server(&config).unwrap_err();
    assert!(err.to_string().contains("server.poll_interval"));

    config.server.poll_interval = 0.001;
    assert!(validate_server(&config).is_ok());
}

#[test]
fn nan_poll_interval_is_rejected() {
    let mut config = MumbleOnlineConfig::default();
    config.server.poll_interval = f64::NAN;
    assert!(validate_server(&config).is_err());
}

#[test]
fn keep_alive_shorter_than_poll_is_rejected() {
    let mut config = MumbleOnlineConfig::default();
    config.server.poll_interval = 10.0;
    config.server.max_interval = 5.0;
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("server.max_interval"));
}

#[test]
fn keep_alive_equal_to_poll_is_accepted() {
    let mut config = MumbleOnlineConfig::default();
    config.server.poll_interval = 2.0;
    config.server.max_interval = 2.0;
    assert!(validate(&config).is_ok());
}

#[test]
fn zero_ports_are_rejected() {
    let mut config = MumbleOnlineConfig::default();
    config.server.port = 0;
    config.indicator.port = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.port"));
    assert!(err.contains("indicator.port"));
}

#[test]
fn collects_all_errors() {
    let mut config = MumbleOnlineConfig::default();
    config.indicator.connect_timeout = 0.0;
    config.indicator.retry_delay = -1.0;
    config.indicator.read_margin = -5.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("indicator.connect_timeout"));
    assert!(err.contains("indicator.retry_delay"));
    assert!(err.contains("indicator.read_margin"));
}

#[test]
fn section_validators_are_independent() {
    let mut config = MumbleOnlineConfig::default();
    config.indicator.retry_delay = 0.0;
    assert!(validate_server(&config).is_ok());
    assert!(validate_indicator(&config).is_err());

    let mut config = MumbleOnlineConfig::default();
    config.server.poll_interval = -1.0;
    assert!(validate_indicator(&config).is_ok());
    assert!(validate_server(&config).is_err());
}

#[test]
fn blank_handshake_field_is_rejected() {
    let mut config = MumbleOnlineConfig::default();
    config.server.handshake_field = mumble_online_common::HandshakeField::new(" ");
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("server.handshake_field"));
}

#[test]
fn blank_source_program_is_rejected() {
    let mut config = MumbleOnlineConfig::default();
    config.source.command = vec![String::new()];
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("source.command[0]"));
}
