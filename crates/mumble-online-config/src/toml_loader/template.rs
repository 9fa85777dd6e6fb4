//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# mumble-online configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Command-line flags take precedence over this file.

[server]
# host = "::"
# port = 43223
# poll_interval = 0.5          # seconds between polls, (0, 3600]
# max_interval = 30.0          # keep-alive bound in seconds, >= poll_interval
# handshake_field = "max_interval"

[source]
# Program printing the voice server's users as a JSON object:
# {"<session>": {"name": "...", "deaf": false, "self_deaf": false,
#                "mute": false, "self_mute": false, "suppress": false}}
# command = ["/usr/local/bin/murmur-users"]

[indicator]
# host = "localhost"
# port = 43223
# filters = []                 # names left out of every count
# formatter = "symbol"         # plain, symbol
# connect_timeout = 30.0
# read_margin = 5.0
# retry_delay = 3.0
# handshake_field = "max_interval"
# output_path = "/run/user/1000/mumble-online-users.txt"

[logging]
# level = "info"               # debug, info, warn, error
"##
    .to_string()
}
