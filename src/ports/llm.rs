//! LLM client port for text completions.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type LlmFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, Error>> + Send + 'a>>;

/// A generic text-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The prompt, sent as a single user turn.
    pub prompt: String,
    /// Sequences at which generation should stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl CompletionRequest {
    /// Creates a request with no stop sequences.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), stop: None }
    }

    /// Adds stop sequences to the request.
    #[must_use]
    pub fn with_stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = Some(stop.into_iter().map(Into::into).collect());
        self
    }
}

/// The text produced for a [`CompletionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text; empty when the service response lacked content.
    pub text: String,
}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit, etc.).
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_>;
}
