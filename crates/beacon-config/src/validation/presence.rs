//! Validation for the `[presence]` section.

use crate::schema::BeaconConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_presence(errors: &mut Vec<String>, config: &BeaconConfig) {
    validate_non_empty(errors, "presence.client_id", &config.presence.client_id);
    validate_range(
        errors,
        "presence.update_delay_ms",
        config.presence.update_delay_ms,
        0,
        60_000,
    );
    validate_range(
        errors,
        "presence.pump_interval_ms",
        config.presence.pump_interval_ms,
        100,
        60_000,
    );
}
