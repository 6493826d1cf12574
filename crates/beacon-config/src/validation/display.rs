//! Validation for the `[display]` section.

use crate::schema::BeaconConfig;

use super::helpers::validate_non_empty;

pub(crate) fn validate_display(errors: &mut Vec<String>, config: &BeaconConfig) {
    validate_non_empty(errors, "display.idle_text", &config.display.idle_text);
}
