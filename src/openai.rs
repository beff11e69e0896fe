//! OpenAI client construction.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client with the given request timeout.
///
/// The timeout bounds every embedding and chat-completion call made through
/// the client; callers pass the value configured in `generation.request_timeout_seconds`.
pub fn create_client(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}
