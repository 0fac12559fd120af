//! Error types shared by every port and adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Tagged failure classes surfaced to callers.
///
/// The enum is serializable so recorded cassettes can replay a failure with
/// its original variant intact.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Error {
    /// The inbound payload carried no usable `search_query`.
    #[error("Missing search query")]
    MissingQuery,

    /// The inbound payload could not be read.
    #[error("Failed to read payload: {0}")]
    Payload(String),

    /// One or both service credentials are absent.
    #[error("Missing API keys")]
    MissingCredentials {
        /// Names of the environment variables that were not set.
        missing: Vec<String>,
    },

    /// Settings rejected at construction time.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The remote service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnosis.
        body: String,
    },

    /// The request never produced a response (connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded at all.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A registered tool failed while the agent was running.
    #[error("Tool `{tool}` failed: {message}")]
    Tool {
        /// Registered tool name.
        tool: String,
        /// Failure description.
        message: String,
    },

    /// The agent runtime failed outside of any single tool call.
    #[error("Agent execution failed: {0}")]
    Agent(String),

    /// A cassette could not be read, written or replayed.
    #[error("Cassette error: {0}")]
    Cassette(String),
}

/// Coarse failure class for an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad inbound payload.
    Input,
    /// Missing or invalid configuration.
    Config,
    /// HTTP status or transport failure.
    Transport,
    /// Undecodable response.
    Parse,
    /// Tool or agent failure.
    Agent,
    /// Record/replay failure.
    Cassette,
}

impl Error {
    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingQuery | Self::Payload(_) => ErrorKind::Input,
            Self::MissingCredentials { .. } | Self::Config(_) => ErrorKind::Config,
            Self::Http { .. } | Self::Transport(_) => ErrorKind::Transport,
            Self::MalformedResponse(_) => ErrorKind::Parse,
            Self::Tool { .. } | Self::Agent(_) => ErrorKind::Agent,
            Self::Cassette(_) => ErrorKind::Cassette,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::Transport(format!("connection failed: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_facing_messages_are_stable() {
        assert_eq!(Error::MissingQuery.to_string(), "Missing search query");
        let missing = Error::MissingCredentials { missing: vec!["ASI_LLM_KEY".into()] };
        assert_eq!(missing.to_string(), "Missing API keys");
    }

    #[test]
    fn http_error_carries_status_and_body() {
        let err = Error::Http { status: 503, body: "upstream down".into() };
        assert_eq!(err.to_string(), "HTTP 503: upstream down");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn kinds_separate_failure_classes() {
        assert_eq!(Error::MissingQuery.kind(), ErrorKind::Input);
        assert_eq!(Error::Payload("x".into()).kind(), ErrorKind::Input);
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Config);
        assert_eq!(Error::MalformedResponse("x".into()).kind(), ErrorKind::Parse);
        let tool = Error::Tool { tool: "search".into(), message: "boom".into() };
        assert_eq!(tool.kind(), ErrorKind::Agent);
        assert_eq!(Error::Cassette("x".into()).kind(), ErrorKind::Cassette);
    }

    #[test]
    fn errors_survive_json_encoding() {
        let err = Error::Http { status: 429, body: "slow down".into() };
        let value = serde_json::to_value(&err).unwrap();
        let back: Error = serde_json::from_value(value).unwrap();
        assert_eq!(back, err);
    }
}
