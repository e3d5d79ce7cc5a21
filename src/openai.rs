//! OpenAI-compatible client configuration for the completion endpoint.

use crate::config::ProviderConfig;
use crate::error::{Result, WebAgentError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for completion requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create a client for the configured endpoint with a custom timeout.
///
/// The endpoint is used as the API base, so requests go to
/// `{endpoint}/chat/completions` with the token as a bearer credential.
pub fn create_client_with_timeout(
    provider: &ProviderConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| WebAgentError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(provider.endpoint.trim_end_matches('/'))
        .with_api_key(provider.token.clone());

    Ok(Client::with_config(config).with_http_client(http_client))
}
