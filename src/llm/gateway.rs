//! Content-gateway client.
//!
//! DESIGN
//! ======
//! The upstream is a thin gateway over a text-generation model: POST a JSON
//! body holding a `prompt` string, read back `{"data": "<reply text>"}`.
//! One attempt per call; timeouts are the only transport policy applied.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::{GenConfig, GenTimeouts};
use super::types::{GenError, GenerateText};

pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct GatewayRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GatewayResponse {
    data: Option<String>,
}

impl GatewayClient {
    /// Build a gateway client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: GenConfig) -> Result<Self, GenError> {
        let http = build_http(config.timeouts)?;
        Ok(Self { http, endpoint: config.endpoint, api_key: config.api_key })
    }

    /// Return the configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_http(timeouts: GenTimeouts) -> Result<reqwest::Client, GenError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| GenError::HttpClientBuild(e.to_string()))
}

/// Extract the reply text from a raw gateway response body.
///
/// A missing `data` field is treated as an empty reply, not an error: the
/// gateway omits it when the model returned nothing.
pub(crate) fn parse_gateway_body(body: &str) -> Result<String, GenError> {
    let parsed: GatewayResponse = serde_json::from_str(body).map_err(|e| GenError::ApiParse(e.to_string()))?;
    Ok(parsed.data.unwrap_or_default())
}

#[async_trait::async_trait]
impl GenerateText for GatewayClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&GatewayRequest { prompt });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenError::ApiRequest(e.to_string()))?;
        if !status.is_success() {
            return Err(GenError::ApiResponse { status: status.as_u16(), body });
        }

        parse_gateway_body(&body)
    }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
