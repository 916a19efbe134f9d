use std::env;

/// Environment variable holding the provider API key.
const API_KEY_VAR: &str = "API_KEY";

/// Stand-in credential used when `API_KEY` is not set. Authenticated
/// provider calls made with it fail with an authentication error.
const PLACEHOLDER_API_KEY: &str = "Coloque sua key aqui";

/// Port the HTTP listener binds to.
pub const LISTEN_PORT: u16 = 8000;

/// Process configuration, read once at startup and injected into the
/// provider client.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_api_key(env::var(API_KEY_VAR).ok())
    }

    /// Build configuration from an optional API key, substituting the
    /// placeholder when none is given.
    pub fn from_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string()),
        }
    }

    /// True when the key is still the placeholder, i.e. `API_KEY` was unset.
    pub fn has_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}
