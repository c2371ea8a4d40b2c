//! Text-generation types — client-neutral trait and errors.

/// Errors produced by the remote text-generation client.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required endpoint environment variable is not set.
    #[error("missing endpoint: env var {var} not set")]
    MissingEndpoint { var: String },

    /// The HTTP request to the generation endpoint failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The generation endpoint returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The generation endpoint response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Client-neutral async trait for free-text generation. Enables mocking in tests.
///
/// The contract is a single attempt: no retry, no caching, no rate limiting.
/// Each caller issues exactly one request per invocation.
#[async_trait::async_trait]
pub trait GenerateText: Send + Sync {
    /// Send a prompt to the generation endpoint and return the raw reply text.
    ///
    /// # Errors
    ///
    /// Returns a [`GenError`] if the request fails or the response is malformed.
    async fn generate(&self, prompt: &str) -> Result<String, GenError>;
}
