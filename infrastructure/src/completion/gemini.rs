//! Gemini `generateContent` client

use crate::config::{ConfigError, FileCompletionConfig};
use async_trait::async_trait;
use buddy_application::{CompletionClient, CompletionError};
use buddy_domain::FALLBACK_REPLY;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key. Keeps the credential out of URLs and logs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Upper bound for establishing a connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error bodies longer than this are cut before being reported
const MAX_ERROR_BODY: usize = 512;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Completion client for the Gemini REST API.
///
/// Sends the prompt as a single user turn and returns the first candidate's
/// first text part. One request per call, no retries.
pub struct GeminiCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiCompletionClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/models/{}:generateContent", base_url, model.trim()),
            api_key: api_key.into(),
        })
    }

    /// Build from the `[completion]` section, reading the key from the
    /// environment variable it names.
    pub fn from_config(config: &FileCompletionConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ConfigError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;
        Self::new(&config.base_url, &config.model, api_key)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for GeminiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if prompt.trim().is_empty() {
            return Err(CompletionError::EmptyPrompt);
        }

        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !status.is_success() {
            let mut body = text;
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(extract_reply(&text))
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
///
/// Anything else (no candidates, no text, blank text, not JSON at all) gives
/// [`FALLBACK_REPLY`].
fn extract_reply(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        debug!("Completion response is not JSON ({} bytes)", body.len());
        return FALLBACK_REPLY.to_string();
    };

    match value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(serde_json::Value::as_str)
    {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => {
            debug!("Completion response has no text part");
            FALLBACK_REPLY.to_string()
        }
    }
}
