//! Validation for the `[indicator]` section.

use crate::schema::MumbleOnlineConfig;

use super::helpers::{validate_not_blank, validate_port, validate_positive_f64, validate_range_f64};

const MAX_DELAY: f64 = 3600.0;

pub(crate) fn validate_indicator(errors: &mut Vec<String>, config: &MumbleOnlineConfig) {
    let indicator = &config.indicator;

    validate_not_blank(errors, "indicator.host", &indicator.host);
    validate_port(errors, "indicator.port", indicator.port);
    validate_positive_f64(
        errors,
        "indicator.connect_timeout",
        indicator.connect_timeout,
        MAX_DELAY,
    );
    validate_range_f64(
        errors,
        "indicator.read_margin",
        indicator.read_margin,
        0.0,
        MAX_DELAY,
    );
    validate_positive_f64(
        errors,
        "indicator.retry_delay",
        indicator.retry_delay,
        MAX_DELAY,
    );
    validate_not_blank(
        errors,
        "indicator.handshake_field",
        indicator.handshake_field.as_str(),
    );
}
