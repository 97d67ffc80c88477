//! Ollama-backed verification oracle
//!
//! Talks to a local Ollama instance over its generate API. The oracle is
//! network-bound and unreliable: requests carry a client-level timeout and a
//! bounded retry with exponential backoff, and every failure mode collapses
//! into the domain's single `VerificationError` at the trait boundary.
//!
//! # Examples
//!
//! ```no_run
//! use sakhi_oracle::OllamaOracle;
//!
//! let oracle = OllamaOracle::new("http://localhost:11434", "llama3");
//! ```

use crate::parser::parse_verdict;
use crate::prompt::build_prompt;
use crate::OracleError;
use async_trait::async_trait;
use sakhi_domain::traits::VerificationOracle;
use sakhi_domain::{ContentBody, Verdict, VerificationError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for oracle requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Verification oracle backed by a local Ollama instance
pub struct OllamaOracle {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaOracle {
    /// Create a new Ollama oracle
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create an oracle against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Send the prompt to Ollama and return the raw model output
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        // Retry with exponential backoff: 1s, 2s, 4s, ...
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(ollama_response) => Ok(ollama_response.response),
                            Err(e) => Err(OracleError::InvalidVerdict(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(OracleError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(OracleError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(OracleError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tracing::debug!(attempt = attempts, ?delay, "retrying oracle request");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| OracleError::Communication("Max retries exceeded".to_string())))
    }

    async fn verify_inner(&self, content: &ContentBody) -> Result<Verdict, OracleError> {
        let prompt = build_prompt(content);
        let response = self.generate(&prompt).await?;
        parse_verdict(&response)
    }
}

#[async_trait]
impl VerificationOracle for OllamaOracle {
    async fn verify(&self, content: &ContentBody) -> Result<Verdict, VerificationError> {
        self.verify_inner(content).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sakhi_domain::LocalizedText;

    fn law() -> ContentBody {
        ContentBody::Law {
            title: LocalizedText::new("Some Act", "कोई अधिनियम"),
            description: LocalizedText::new("Details", "विवरण"),
        }
    }

    #[test]
    fn test_oracle_creation() {
        let oracle = OllamaOracle::new("http://localhost:11434", "llama3");
        assert_eq!(oracle.endpoint, "http://localhost:11434");
        assert_eq!(oracle.model, "llama3");
        assert_eq!(oracle.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_oracle_default_endpoint() {
        let oracle = OllamaOracle::default_endpoint("mistral");
        assert_eq!(oracle.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(oracle.model, "mistral");
    }

    #[test]
    fn test_with_max_retries() {
        let oracle = OllamaOracle::new("http://localhost:11434", "llama3").with_max_retries(5);
        assert_eq!(oracle.max_retries, 5);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        // Unroutable port, single attempt so the test stays fast
        let oracle = OllamaOracle::new("http://127.0.0.1:1", "llama3").with_max_retries(1);

        let result = oracle.verify_inner(&law()).await;
        match result {
            Err(OracleError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_failure_collapses_at_trait_boundary() {
        let oracle = OllamaOracle::new("http://127.0.0.1:1", "llama3").with_max_retries(1);

        let err = oracle.verify(&law()).await.unwrap_err();
        assert!(err.message().starts_with("Communication error"));
    }

    // Integration test (requires running Ollama)
    #[tokio::test]
    #[ignore]
    async fn test_ollama_verify_integration() {
        let oracle = OllamaOracle::default_endpoint("llama3");
        let result = oracle.verify(&law()).await;

        if let Ok(verdict) = result {
            assert!(!verdict.notes.is_empty() || verdict.is_verified);
        }
    }
}
