//! Validation for the `[server]` and `[source]` sections.

use crate::schema::MumbleOnlineConfig;

use super::helpers::{validate_not_blank, validate_port, validate_range_f64};

/// Shortest poll interval; anything below rounds towards a zero-length tick.
const MIN_POLL_INTERVAL: f64 = 0.001;
const MAX_POLL_INTERVAL: f64 = 3600.0;
const MAX_KEEP_ALIVE: f64 = 86400.0;

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &MumbleOnlineConfig) {
    let server = &config.server;

    validate_not_blank(errors, "server.host", &server.host);
    validate_port(errors, "server.port", server.port);
    validate_range_f64(
        errors,
        "server.poll_interval",
        server.poll_interval,
        MIN_POLL_INTERVAL,
        MAX_POLL_INTERVAL,
    );
    // The keep-alive bound must allow at least one poll.
    validate_range_f64(
        errors,
        "server.max_interval",
        server.max_interval,
        server.poll_interval.max(0.0),
        MAX_KEEP_ALIVE,
    );
    validate_not_blank(
        errors,
        "server.handshake_field",
        server.handshake_field.as_str(),
    );

    if let Some(program) = config.source.command.first() {
        validate_not_blank(errors, "source.command[0]", program);
    }
}
