//! HTTP client for the Ollama `/api/generate` endpoint.
//!
//! A single non-streaming request is made per run. Every failure mode is
//! reported on stderr and collapsed to "no response" for the caller; there
//! are no retries.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::Configuration;

use super::prompt;

/// Upper bound for the whole generation request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const TEMPERATURE: f32 = 0.1;

/// Request body for `/api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    /// Unload the model right after answering.
    pub keep_alive: u32,
    pub options: SamplingOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub stop: Vec<String>,
}

impl GenerationRequest {
    pub fn new(model: &str, user_prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt::build_prompt(user_prompt),
            stream: false,
            keep_alive: 0,
            options: SamplingOptions {
                temperature: TEMPERATURE,
                stop: prompt::STOP_SEQUENCES.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    response: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Could not connect to Ollama at {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Timeout waiting for Ollama response")]
    Timeout,

    #[error("HTTP {status} from Ollama")]
    Status { status: StatusCode, body: String },

    #[error("Could not decode JSON response from Ollama")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Ollama request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Anything that can turn a user request into a raw model completion.
#[allow(async_fn_in_trait)]
pub trait CommandGenerator {
    /// Returns the raw completion text, or `None` if the backend failed.
    async fn generate(&self, model: &str, user_prompt: &str) -> Option<String>;
}

pub struct InferenceClient {
    client: reqwest::Client,
    api_url: Url,
}

impl InferenceClient {
    pub fn new(config: &Configuration) -> Result<Self> {
        Self::with_timeout(config.api_url.clone(), REQUEST_TIMEOUT)
    }

    pub fn with_timeout(api_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Send one generation request and return the `response` text.
    pub async fn request(&self, model: &str, user_prompt: &str) -> Result<String, InferenceError> {
        let body = GenerationRequest::new(model, user_prompt);

        let response = self
            .client
            .post(self.api_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        debug!(%status, bytes = text.len(), "received response from Ollama");

        if !status.is_success() {
            return Err(InferenceError::Status { status, body: text });
        }

        serde_json::from_str::<GenerationResponse>(&text)
            .map(|parsed| parsed.response)
            .map_err(|source| InferenceError::Decode { body: text, source })
    }

    fn classify(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout
        } else if e.is_connect() {
            InferenceError::Connect {
                url: self.api_url.to_string(),
                source: e,
            }
        } else {
            InferenceError::Request(e)
        }
    }
}

impl CommandGenerator for InferenceClient {
    async fn generate(&self, model: &str, user_prompt: &str) -> Option<String> {
        println!(" Sending prompt to Ollama (model: {}, API: {})...", model, self.api_url());
        info!(model, api_url = %self.api_url(), "sending generation request");

        match self.request(model, user_prompt).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                error!("generation request failed: {:?}", e);
                report(&e);
                None
            }
        }
    }
}

/// Print a user-facing diagnostic for an inference failure.
pub fn report(e: &InferenceError) {
    match e {
        InferenceError::Connect { .. } => {
            eprintln!("Error: {}", e);
            eprintln!("Make sure Ollama is running and the API URL in your config/environment is correct.");
        }
        InferenceError::Timeout => eprintln!("Error: {}.", e),
        InferenceError::Status { body, .. } => {
            eprintln!("Error in Ollama request: {}", e);
            if !body.trim().is_empty() {
                eprintln!("Ollama error details: {}", body.trim());
            }
        }
        InferenceError::Decode { body, .. } => {
            eprintln!("Error: {}.", e);
            eprintln!("Received response: {}", body);
        }
        InferenceError::Request(_) => eprintln!("Error in Ollama request: {}", e),
    }
}
