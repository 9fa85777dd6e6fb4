//! Full configuration validation.
//!
//! Validates numeric ranges and the cross-field constraints between the
//! poll cadence and the keep-alive bound. Each section has its own
//! submodule; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod indicator;
mod server;

#[cfg(test)]
mod tests;

use crate::schema::MumbleOnlineConfig;
use mumble_online_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MumbleOnlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    server::validate_server(&mut errors, config);
    indicator::validate_indicator(&mut errors, config);

    into_result(errors)
}

/// Validate only what the broadcast server reads.
pub fn validate_server(config: &MumbleOnlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    server::validate_server(&mut errors, config);
    into_result(errors)
}

/// Validate only what the indicator reads.
pub fn validate_indicator(config: &MumbleOnlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    indicator::validate_indicator(&mut errors, config);
    into_result(errors)
}

fn into_result(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
