use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::error::NarrativeError;
use crate::config::NarrativeConfig;

/// Something that turns a prompt into a reading.
pub trait NarrativeProvider {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, NarrativeError>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct ChatCompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl ChatCompletionClient {
    /// Create a client from validated config. Fails only if the HTTP client
    /// cannot be built.
    pub fn new(config: &NarrativeConfig, api_key: String) -> Result<Self, NarrativeError> {
        let timeout = humantime::parse_duration(config.timeout.trim())
            .unwrap_or(Duration::from_secs(30));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fate-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: completions_url(&config.endpoint),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

impl NarrativeProvider for ChatCompletionClient {
    async fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(url = %self.url, model = %self.model, "requesting narrative");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;

        if !status.is_success() {
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        parse_reply(&body)
    }
}

fn map_request_error(e: reqwest::Error) -> NarrativeError {
    if e.is_timeout() {
        NarrativeError::Timeout
    } else {
        NarrativeError::Http(e)
    }
}

fn completions_url(endpoint: &str) -> String {
    format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}

/// Extract the first choice's text from a chat-completion response body.
pub fn parse_reply(body: &str) -> Result<String, NarrativeError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| strip_code_fences(&content))
        .unwrap_or_default();

    if text.is_empty() {
        Err(NarrativeError::EmptyReply)
    } else {
        Ok(text)
    }
}

/// Remove markdown code fences some models wrap their answer in.
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
