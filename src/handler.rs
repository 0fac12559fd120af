//! Top-level search handler: `{"search_query": ..}` in, `{"result"|"error": ..}` out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{ApiKeys, Credentials, Settings};
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// Wire response of the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandlerResponse {
    /// The agent's final answer.
    Result {
        /// Answer text.
        result: String,
    },
    /// Any failure, rendered as its message.
    Error {
        /// Error message.
        error: String,
    },
}

impl HandlerResponse {
    /// Converts the handler's tagged outcome into the wire shape.
    #[must_use]
    pub fn from_outcome(outcome: Result<String>) -> Self {
        match outcome {
            Ok(result) => Self::Result { result },
            Err(e) => Self::Error { error: e.to_string() },
        }
    }

    /// Renders the response as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Result { result } => serde_json::json!({ "result": result }),
            Self::Error { error } => serde_json::json!({ "error": error }),
        }
    }
}

/// Pulls a non-empty `search_query` string out of the inbound payload.
///
/// # Errors
///
/// Returns [`Error::MissingQuery`] when the field is absent, not a string or empty.
pub fn search_query(input: &Value) -> Result<&str> {
    input
        .get("search_query")
        .and_then(Value::as_str)
        .filter(|q| !q.is_empty())
        .ok_or(Error::MissingQuery)
}

/// Answers search queries with an injected way of building the service context.
///
/// The connector runs only once the query and both credentials are known to be
/// present, so payload and configuration problems never reach the network.
pub struct SearchHandler<F> {
    credentials: Credentials,
    connect: F,
}

impl<F> SearchHandler<F>
where
    F: Fn(&ApiKeys) -> Result<ServiceContext>,
{
    /// Creates a handler from credentials and a context connector.
    pub fn new(credentials: Credentials, connect: F) -> Self {
        Self { credentials, connect }
    }

    /// Answers the payload, keeping the failure class.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingQuery`], [`Error::MissingCredentials`], or
    /// whatever the connector or agent runtime fails with.
    pub async fn answer(&self, input: &Value) -> Result<String> {
        let query = search_query(input)?;
        let keys = self.credentials.require()?;
        let ctx = (self.connect)(&keys)?;
        ctx.run(query).await
    }

    /// Answers the payload in the wire shape.
    pub async fn handle(&self, input: &Value) -> HandlerResponse {
        let span = info_span!("search", request_id = %Uuid::new_v4());
        async {
            let outcome = self.answer(input).await;
            match &outcome {
                Ok(answer) => info!(answer_chars = answer.len(), "search answered"),
                Err(e) => warn!(kind = ?e.kind(), error = %e, "search failed"),
            }
            HandlerResponse::from_outcome(outcome)
        }
        .instrument(span)
        .await
    }
}

/// Creates a handler that talks to the live services.
pub fn live_handler(
    credentials: Credentials,
    settings: Settings,
) -> SearchHandler<impl Fn(&ApiKeys) -> Result<ServiceContext>> {
    SearchHandler::new(credentials, move |keys: &ApiKeys| ServiceContext::live(keys, &settings))
}
