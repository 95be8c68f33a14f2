use lockshift_config::normalize_registry;

/// clap value parser for `--registry`.
pub fn parse_registry(s: &str) -> Result<String, String> {
    normalize_registry(s).map_err(|_| format!("'{s}' is not an http(s) registry URL"))
}
