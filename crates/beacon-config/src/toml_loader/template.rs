//! Default TOML config template with inline documentation comments.

use crate::schema::CONFIG_SCHEMA_VERSION;

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    format!("# Beacon Configuration\n# Schema version {CONFIG_SCHEMA_VERSION}\n{BODY}")
}

const BODY: &str = r##"# Only override what you want to change -- missing fields use defaults.

[presence]
# enabled = true
# client_id = "beacon"
# update_delay_ms = 1000    # 0-60000, debounce applied to every update
# pump_interval_ms = 2000   # 100-60000, transport callback period

[display]
# show_resources = true
# show_elapsed_time = true
# idle_text = "Idle"

[logging]
# level = "INFO"            # DEBUG, INFO, WARNING, ERROR
"##;
