//! Remote estimation boundary — HTTP client for the text-generation endpoint.
//!
//! DESIGN
//! ======
//! Services depend on the [`GenerateText`] trait, never on the concrete
//! client, so tests can substitute canned replies. The concrete client is a
//! content gateway configured from environment variables at startup;
//! configuration absence disables estimation rather than failing startup.

pub mod config;
pub mod gateway;
pub mod types;

pub use gateway::GatewayClient;
pub use types::{GenError, GenerateText};

use config::GenConfig;

/// Build the estimator client from environment variables.
///
/// # Errors
///
/// Returns an error if the endpoint is not configured or the HTTP client
/// fails to build.
pub fn client_from_env() -> Result<GatewayClient, GenError> {
    let config = GenConfig::from_env()?;
    GatewayClient::new(config)
}
