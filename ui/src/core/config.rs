//! Where the deduplication service lives.

use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/upload-pdf";

/// Environment variable consulted at runtime (native) and at compile time (all targets).
pub const ENDPOINT_VAR: &str = "EXAMDEDUP_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("endpoint `{0}` must start with http:// or https://")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    endpoint: String,
}

impl ServiceConfig {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into().trim().to_string();
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Ok(Self { endpoint })
        } else {
            Err(ConfigError::InvalidEndpoint(endpoint))
        }
    }

    /// Runtime override, then build-time override, then [`DEFAULT_ENDPOINT`].
    pub fn from_env() -> Self {
        Self::resolve(runtime_override(), option_env!("EXAMDEDUP_ENDPOINT"))
    }

    fn resolve(runtime: Option<String>, compiled: Option<&str>) -> Self {
        let candidate = runtime
            .filter(|value| !value.trim().is_empty())
            .or_else(|| compiled.map(str::to_string));

        match candidate {
            Some(value) => Self::new(value).unwrap_or_else(|err| {
                tracing::warn!("{err}; falling back to {DEFAULT_ENDPOINT}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_override() -> Option<String> {
    std::env::var(ENDPOINT_VAR).ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_override() -> Option<String> {
    None
}
