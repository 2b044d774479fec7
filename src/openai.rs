//! Shared OpenAI client construction.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Hard ceiling on any single API call. A stalled transcription, embedding
/// or completion request surfaces as a timeout on its pipeline stage rather
/// than hanging the turn.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Build the OpenAI client used by every adapter.
///
/// The API key comes from `OPENAI_API_KEY`; preflight verifies it is set
/// before any expensive operation starts.
pub fn create_client() -> Client<OpenAIConfig> {
    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default();

    Client::with_config(OpenAIConfig::default()).with_http_client(http)
}
