//! Estimator client configuration parsed from environment variables.

use super::types::GenError;

pub const DEFAULT_GEN_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GEN_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// Content-gateway endpoint receiving `{"prompt": ...}` POST bodies.
    pub endpoint: String,
    /// Optional bearer token sent with each request.
    pub api_key: Option<String>,
    pub timeouts: GenTimeouts,
}

impl GenConfig {
    /// Build typed estimator config from environment variables.
    ///
    /// Required:
    /// - `ESTIMATOR_API_URL`: generation endpoint URL
    ///
    /// Optional:
    /// - `ESTIMATOR_API_KEY`: bearer token, omitted when absent
    /// - `ESTIMATOR_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ESTIMATOR_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is missing or empty.
    pub fn from_env() -> Result<Self, GenError> {
        let endpoint = std::env::var("ESTIMATOR_API_URL")
            .map_err(|_| GenError::MissingEndpoint { var: "ESTIMATOR_API_URL".into() })?;
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(GenError::ConfigParse("ESTIMATOR_API_URL is empty".into()));
        }

        let api_key = std::env::var("ESTIMATOR_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let timeouts = GenTimeouts {
            request_secs: env_parse_u64("ESTIMATOR_REQUEST_TIMEOUT_SECS", DEFAULT_GEN_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("ESTIMATOR_CONNECT_TIMEOUT_SECS", DEFAULT_GEN_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { endpoint, api_key, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
