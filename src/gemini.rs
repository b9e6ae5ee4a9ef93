use std::fmt;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{GenerateRequest, GenerateResponse};

pub trait TextGenerator {
    /// Sends a single prompt and returns the model's text.
    fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        if config.google_api_key.trim().is_empty() {
            return Err(Error::Config("Google API key is required".to_string()));
        }

        let client = config.http_client_builder().build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        let url = format!(
            "{}/models/{}:generateContent",
            config.gemini_endpoint.trim_end_matches('/'),
            config.model
        );

        Self {
            client,
            url,
            api_key: config.google_api_key.clone(),
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        debug!("POST {} ({} prompt chars)", self.url, prompt.len());

        let resp = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        parse_generate_response(status, &body)
    }
}

pub fn parse_generate_response(status: StatusCode, body: &str) -> Result<String> {
    let parsed = serde_json::from_str::<GenerateResponse>(body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| body.to_string());
        return Err(Error::Api {
            service: "Gemini",
            status,
            message,
        });
    }

    let response = parsed.map_err(|source| Error::Parse {
        what: "generation response",
        source,
    })?;

    if let Some(message) = response.error.and_then(|e| e.message) {
        return Err(Error::Api {
            service: "Gemini",
            status,
            message,
        });
    }

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(Error::Blocked(reason));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::EmptyGeneration);
    }
    Ok(text)
}
