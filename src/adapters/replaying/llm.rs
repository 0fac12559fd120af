//! Replaying adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

/// Serves recorded LLM completions from a cassette.
pub struct ReplayingLlmClient {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying LLM client with no cassette. Every call fails.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "llm", "complete");
        Box::pin(async move { replay_result(output) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::error::Error;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn serves_recorded_completions_in_order() {
        let cassette = Cassette {
            name: "llm".into(),
            recorded_at: Utc::now(),
            client_version: "0.1.0".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "llm".into(),
                    method: "complete".into(),
                    input: json!({"prompt": "a"}),
                    output: json!({"Ok": {"text": "first"}}),
                },
                Interaction {
                    seq: 1,
                    port: "llm".into(),
                    method: "complete".into(),
                    input: json!({"prompt": "b"}),
                    output: json!({"Err": {"Http": {"status": 500, "body": "boom"}}}),
                },
            ],
        };
        let client =
            ReplayingLlmClient::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))));

        let first = client.complete(&CompletionRequest::new("a")).await.unwrap();
        assert_eq!(first.text, "first");
        let second = client.complete(&CompletionRequest::new("b")).await.unwrap_err();
        assert_eq!(second, Error::Http { status: 500, body: "boom".into() });
        let third = client.complete(&CompletionRequest::new("c")).await.unwrap_err();
        assert!(matches!(third, Error::Cassette(_)));
    }

    #[tokio::test]
    async fn unconfigured_client_fails_cleanly() {
        let client = ReplayingLlmClient::unconfigured();
        let err = client.complete(&CompletionRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, Error::Cassette(_)));
    }
}
