use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{info, error};

pub const MODEL_NAME: &str = "black-forest-labs/FLUX.1-schnell";

/// Value shipped in .env.example; treated the same as no token at all.
pub const TOKEN_PLACEHOLDER: &str = "your_token_here";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Please enter a prompt to generate an image.")]
    EmptyPrompt,
    #[error("Hugging Face API token not configured.")]
    TokenMissing,
    #[error("Rate limit reached. Please wait a few minutes and try again.")]
    RateLimited,
    #[error("Authentication failed. Please check your API token.")]
    Unauthorized,
    #[error("Model not found or not accessible.")]
    ModelNotFound,
    #[error("An error occurred: {0}")]
    Unknown(String),
}

impl GenerateError {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::EmptyPrompt => "empty_prompt",
            GenerateError::TokenMissing => "token_missing",
            GenerateError::RateLimited => "rate_limited",
            GenerateError::Unauthorized => "unauthorized",
            GenerateError::ModelNotFound => "model_not_found",
            GenerateError::Unknown(_) => "unknown",
        }
    }

    /// Actionable follow-up shown under the error message in the UI.
    pub fn hint(&self) -> String {
        match self {
            GenerateError::EmptyPrompt => {
                "Describe the image you want to generate in detail.".into()
            }
            GenerateError::TokenMissing => {
                "Create a token at https://huggingface.co/settings/tokens, add HF_TOKEN=<token> to a .env file in the project root, and restart the application.".into()
            }
            GenerateError::RateLimited => {
                "The free tier has usage limits. Consider waiting or upgrading your Hugging Face account.".into()
            }
            GenerateError::Unauthorized => {
                "Make sure your token has permission to call the serverless Inference API.".into()
            }
            GenerateError::ModelNotFound => {
                format!("The model '{}' may not be available. Try a different model.", MODEL_NAME)
            }
            GenerateError::Unknown(_) => {
                "Please try again or check your internet connection.".into()
            }
        }
    }
}

/// Maps whatever error text the remote side produced onto the user-facing
/// taxonomy. This is best-effort substring sniffing, not a structured
/// contract: the inference API reports failures as free-form text, so we
/// match the phrases it is known to use. Literal "401"/"404" are matched
/// against the original message so status-line digits count too.
pub fn classify(message: &str) -> GenerateError {
    let lower = message.to_lowercase();
    if lower.contains("rate limit") {
        GenerateError::RateLimited
    } else if lower.contains("unauthorized") || message.contains("401") {
        GenerateError::Unauthorized
    } else if lower.contains("not found") || message.contains("404") {
        GenerateError::ModelNotFound
    } else {
        GenerateError::Unknown(message.to_string())
    }
}

/// Seam over the remote text-to-image call so the request flow can be
/// exercised against a mock.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate(&self, prompt: &str, width: u32, height: u32) -> Result<Bytes, GenerateError>;
}

pub struct HfClient {
    client: Client,
    token: String,
    base_url: String,
}

impl HfClient {
    pub fn new(token: String) -> Self {
        let base_url = std::env::var("HF_API_BASE")
            .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string());
        Self {
            client: Client::new(),
            token,
            base_url,
        }
    }

    pub fn token_configured(&self) -> bool {
        !self.token.is_empty() && self.token != TOKEN_PLACEHOLDER
    }
}

#[async_trait]
impl ImageBackend for HfClient {
    /// One POST per invocation, no retries, reqwest's default timeout. A
    /// successful response body is the raw image bytes.
    async fn generate(&self, prompt: &str, width: u32, height: u32) -> Result<Bytes, GenerateError> {
        if !self.token_configured() {
            return Err(GenerateError::TokenMissing);
        }

        let url = format!("{}/models/{}", self.base_url, MODEL_NAME);
        info!("🔗 Requesting {}x{} image from {}", width, height, url);

        let request_body = json!({
            "inputs": prompt,
            "parameters": { "width": width, "height": height }
        });

        let response = self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify(&e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ API error response: {}", error_body);
            return Err(classify(&format!("status={} body={}", status, error_body)));
        }

        let bytes = response.bytes().await.map_err(|e| classify(&e.to_string()))?;
        info!("🖼️ Received {} image bytes", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mixed_case_rate_limit_message() {
        assert_eq!(classify("Rate Limit Exceeded"), GenerateError::RateLimited);
    }

    #[test]
    fn unauthorized_by_word_or_status_code() {
        assert_eq!(classify("request was Unauthorized"), GenerateError::Unauthorized);
        assert_eq!(classify("status=401 Unauthorized body={}"), GenerateError::Unauthorized);
        assert_eq!(classify("HTTP 401"), GenerateError::Unauthorized);
    }

    #[test]
    fn model_not_found_by_phrase_or_status_code() {
        assert_eq!(classify("model Not Found"), GenerateError::ModelNotFound);
        assert_eq!(classify("404 - resource missing"), GenerateError::ModelNotFound);
    }

    #[test]
    fn rate_limit_wins_over_later_rules() {
        // A body mentioning rate limits under a 404 status still reads as a
        // rate limit, matching the original branch order.
        assert_eq!(
            classify("status=404 body=rate limit reached"),
            GenerateError::RateLimited
        );
    }

    #[test]
    fn unmatched_text_becomes_unknown_with_raw_message() {
        let msg = "connection reset by peer";
        assert_eq!(classify(msg), GenerateError::Unknown(msg.to_string()));
    }

    #[test]
    fn placeholder_token_counts_as_unconfigured() {
        assert!(!HfClient::new(String::new()).token_configured());
        assert!(!HfClient::new(TOKEN_PLACEHOLDER.to_string()).token_configured());
        assert!(HfClient::new("hf_real_token".to_string()).token_configured());
    }
}
