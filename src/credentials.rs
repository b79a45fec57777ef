use tracing::{debug, warn};

/// Environment variable the CLI reads the Mapbox token from
pub const MAPBOX_API_KEY_ENV: &str = "MAPBOX_API_KEY";

/// Read the Mapbox token from the environment. Only the CLI calls this; the
/// library takes the value as an explicit fallback.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(MAPBOX_API_KEY_ENV).ok()
}

/// Pick the effective Mapbox token. The explicit key wins over the fallback.
/// When neither is set the map still renders, but tiles may not load.
pub fn resolve_api_key(explicit: Option<String>, fallback: Option<String>) -> Option<String> {
    let explicit = explicit.filter(|key| !key.is_empty());
    if explicit.is_some() {
        debug!("Using explicit Mapbox API key");
        return explicit;
    }

    let fallback = fallback.filter(|key| !key.is_empty());
    if fallback.is_none() {
        warn!(
            "api_key not provided and {} environment variable not set. Map may not display.",
            MAPBOX_API_KEY_ENV
        );
    }
    fallback
}
