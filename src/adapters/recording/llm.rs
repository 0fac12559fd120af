//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

/// Records LLM interactions while delegating to an inner implementation.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Creates a new recording LLM client wrapping the given implementation.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&self.recorder, "llm", "complete", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::error::Error;
    use crate::ports::CompletionResponse;

    struct Scripted(Result<String, Error>);

    impl LlmClient for Scripted {
        fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
            let result = self.0.clone().map(|text| CompletionResponse { text });
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn records_success_and_failure() {
        let dir = std::env::temp_dir().join("asi_search_rec_llm_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("llm.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "llm")));

        {
            let ok = RecordingLlmClient::new(
                Box::new(Scripted(Ok("hello".into()))),
                Arc::clone(&recorder),
            );
            let response = ok.complete(&CompletionRequest::new("greet")).await.unwrap();
            assert_eq!(response.text, "hello");

            let failing = RecordingLlmClient::new(
                Box::new(Scripted(Err(Error::Http { status: 500, body: "boom".into() }))),
                Arc::clone(&recorder),
            );
            assert!(failing.complete(&CompletionRequest::new("greet")).await.is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::from_yaml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].input["prompt"], "greet");
        assert_eq!(cassette.interactions[0].output["Ok"]["text"], "hello");
        assert_eq!(cassette.interactions[1].output["Err"]["Http"]["status"], 500);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
