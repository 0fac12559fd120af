//! Live adapter for the `LlmClient` port using a chat-completions API.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::error::{Error, Result};
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

/// Live LLM client that calls a chat-completions endpoint.
///
/// Holds only immutable configuration and a shared connection pool, so one
/// instance can serve concurrent calls.
pub struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    settings: LlmSettings,
}

impl ChatCompletionsClient {
    /// Creates a new client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the key is empty or the settings are invalid.
    pub fn new(api_key: impl Into<String>, settings: LlmSettings) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Config("LLM API key must not be empty".into()));
        }
        settings.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_key, settings })
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage { role: "user", content: &request.prompt }],
            temperature: self.settings.temperature,
            fun_mode: self.settings.fun_mode,
            web_search: self.settings.web_search,
            stream: self.settings.stream,
            max_tokens: self.settings.max_tokens,
            stop: request.stop.as_deref().filter(|stop| !stop.is_empty()),
        }
    }

    async fn send(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let body = self.body(request);
        debug!(
            url = %self.settings.api_url,
            model = %self.settings.model,
            prompt_chars = request.prompt.len(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "chat completion rejected");
            return Err(Error::Http { status: status.as_u16(), body: response_text });
        }

        let text = extract_content(&response_text)?;
        debug!(status = status.as_u16(), chars = text.len(), "chat completion received");
        Ok(CompletionResponse { text })
    }
}

/// Request body sent to the chat-completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    fun_mode: bool,
    web_search: bool,
    stream: bool,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

/// A single message in the request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Pulls `choices[0].message.content` out of a response body.
///
/// A body that is not JSON fails. A JSON body missing any step of the path
/// yields an empty string, logged as a warning.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the body is not valid JSON.
pub fn extract_content(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("response is not JSON: {e}")))?;

    let content = value
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str);

    if let Some(text) = content {
        Ok(text.to_string())
    } else {
        warn!("response has no choices[0].message.content; returning empty text");
        Ok(String::new())
    }
}

impl LlmClient for ChatCompletionsClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();
        Box::pin(async move { self.send(&request).await })
    }
}
