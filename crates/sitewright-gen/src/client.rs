//! Generation service contract and live Anthropic API client
//!
//! Key design: every call is stateless. No conversation history is maintained;
//! improvement context travels inside the prompt (prior rejected artifact).

use crate::auth;
use crate::circuit_breaker::CircuitBreaker;
use crate::types::{AnthropicMessage, AnthropicRequest, AnthropicResponse, GenerationRequest};
use async_trait::async_trait;
use sitewright_core::{Result, SitewrightError};
use std::sync::OnceLock;
use std::time::Duration;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// Rate limit retry configuration
const MAX_RETRIES: u32 = 5;
const INITIAL_BACKOFF_SECS: u64 = 30;
const MAX_BACKOFF_SECS: u64 = 300; // 5 minutes max

// Global circuit breaker - shared across all generation calls
static CIRCUIT_BREAKER: OnceLock<CircuitBreaker> = OnceLock::new();

fn get_circuit_breaker() -> &'static CircuitBreaker {
    CIRCUIT_BREAKER.get_or_init(CircuitBreaker::default)
}

/// The external text-generation service.
///
/// Implementations must return the complete response text in one string;
/// streamed transports are drained before returning. Downstream stages never
/// observe partial output.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// Live Anthropic API client
#[derive(Debug, Clone, Default)]
pub struct AnthropicClient;

impl AnthropicClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GenerationService for AnthropicClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let circuit_breaker = get_circuit_breaker();

        // Check circuit breaker before attempting API call
        if !circuit_breaker.can_execute() {
            let time_until_retry = circuit_breaker.time_until_retry();
            return Err(SitewrightError::ApiLimit(format!(
                "Circuit breaker is OPEN - too many API failures. Wait {} seconds before retry.",
                time_until_retry / 1000
            )));
        }

        let auth_token = auth::get_auth_token()?;

        let wire_request = AnthropicRequest {
            model: request.model.api_name().to_string(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system_prompt.clone(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: request.user_prompt.clone(),
            }],
        };

        // Retry loop with exponential backoff for rate limits
        let mut retries = 0;
        let mut backoff_secs = INITIAL_BACKOFF_SECS;

        loop {
            tracing::debug!("Sending generation request (attempt {})", retries + 1);

            let client = reqwest::Client::new();
            let response = client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &auth_token)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&wire_request)
                .send()
                .await
                .map_err(|e| SitewrightError::Api(format!("Failed to send request: {}", e)))?;

            let status = response.status();

            // Handle rate limit (429) with retry
            if status.as_u16() == 429 {
                retries += 1;

                if retries > MAX_RETRIES {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown".to_string());
                    return Err(SitewrightError::ApiLimit(format!(
                        "Rate limit exceeded after {} retries. Last error: {}",
                        MAX_RETRIES, error_text
                    )));
                }

                // Parse retry-after header if present, otherwise use exponential backoff
                let wait_secs = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(backoff_secs);

                tracing::warn!(
                    "Rate limited (429). Waiting {} seconds before retry {}/{}",
                    wait_secs,
                    retries,
                    MAX_RETRIES
                );

                tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                continue;
            }

            // Handle other errors
            if !status.is_success() {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown".to_string());

                // Retry on 5xx errors
                if status.is_server_error() && retries < MAX_RETRIES {
                    retries += 1;
                    tracing::warn!(
                        "Server error ({}). Waiting {} seconds before retry {}/{}",
                        status,
                        backoff_secs,
                        retries,
                        MAX_RETRIES
                    );
                    tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                // Non-retryable error - record circuit breaker failure
                circuit_breaker.record_failure();
                tracing::error!(
                    "Circuit breaker: recorded failure (count: {})",
                    circuit_breaker.failure_count()
                );

                return Err(SitewrightError::Api(format!(
                    "Generation service error {}: {}",
                    status, error_text
                )));
            }

            // Success - parse response and accumulate all content blocks into one string
            let anthropic_response: AnthropicResponse = response
                .json()
                .await
                .map_err(|e| SitewrightError::Api(format!("Failed to parse response: {}", e)))?;

            if anthropic_response.content.is_empty() {
                return Err(SitewrightError::Api("No content in response".to_string()));
            }

            let output: String = anthropic_response
                .content
                .iter()
                .map(|block| block.text.as_str())
                .collect();

            // Successful API call - reset circuit breaker
            circuit_breaker.record_success();

            if let Some(usage) = &anthropic_response.usage {
                tracing::info!(
                    "Generation complete ({} chars, {} input tokens, {} output tokens)",
                    output.len(),
                    usage.input_tokens,
                    usage.output_tokens
                );
            } else {
                tracing::info!("Generation complete ({} chars)", output.len());
            }

            return Ok(output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Model;

    #[tokio::test]
    async fn test_generate_no_auth() {
        std::env::remove_var("CLAUDE_CODE_OAUTH_TOKEN");
        std::env::remove_var("ANTHROPIC_API_KEY");

        let client = AnthropicClient::new();
        let result = client
            .generate(GenerationRequest {
                model: Model::Sonnet,
                max_tokens: 1000,
                temperature: 0.7,
                system_prompt: "test".to_string(),
                user_prompt: "test prompt".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
