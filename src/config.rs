//! Explicit configuration: service credentials and adapter settings.
//!
//! Nothing here reads global state implicitly. The binary calls
//! [`Credentials::from_env`] once at startup; tests build values directly or
//! through [`Credentials::from_lookup`].

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the chat-completions credential.
pub const LLM_KEY_VAR: &str = "ASI_LLM_KEY";
/// Environment variable holding the search credential.
pub const SEARCH_KEY_VAR: &str = "TAVILY_API_KEY";

/// Default chat-completions endpoint.
pub const DEFAULT_LLM_URL: &str = "https://api.asi1.ai/v1/chat/completions";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "asi1-mini";
/// Default search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://api.tavily.com/search";

/// Credentials as found in the environment; either may be absent.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Bearer token for the chat-completions service.
    pub llm_api_key: Option<String>,
    /// API key for the search service.
    pub search_api_key: Option<String>,
}

/// Both credentials, known to be present and non-empty.
#[derive(Clone)]
pub struct ApiKeys {
    /// Bearer token for the chat-completions service.
    pub llm: String,
    /// API key for the search service.
    pub search: String,
}

impl Credentials {
    /// Reads credentials from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through an arbitrary lookup function.
    ///
    /// Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self { llm_api_key: read(LLM_KEY_VAR), search_api_key: read(SEARCH_KEY_VAR) }
    }

    /// Returns both keys, or [`Error::MissingCredentials`] naming what is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if either credential is missing.
    pub fn require(&self) -> Result<ApiKeys> {
        match (&self.llm_api_key, &self.search_api_key) {
            (Some(llm), Some(search)) => Ok(ApiKeys { llm: llm.clone(), search: search.clone() }),
            (llm, search) => {
                let mut missing = Vec::new();
                if llm.is_none() {
                    missing.push(LLM_KEY_VAR.to_string());
                }
                if search.is_none() {
                    missing.push(SEARCH_KEY_VAR.to_string());
                }
                Err(Error::MissingCredentials { missing })
            }
        }
    }
}

fn redact(value: Option<&String>) -> &'static str {
    if value.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &redact(self.llm_api_key.as_ref()))
            .field("search_api_key", &redact(self.search_api_key.as_ref()))
            .finish()
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys").field("llm", &"<set>").field("search", &"<set>").finish()
    }
}

/// Settings for the chat-completions adapter. Immutable once the adapter is built.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    /// Chat-completions endpoint.
    pub api_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature, in `[0, 2]`.
    pub temperature: f32,
    /// Provider-specific flag, passed through untouched.
    pub fun_mode: bool,
    /// Provider-specific flag, passed through untouched.
    pub web_search: bool,
    /// Streaming flag, passed through untouched.
    pub stream: bool,
    /// Cap on generated tokens; must be positive.
    pub max_tokens: u32,
    /// Per-request timeout. `None` waits for as long as the transport does.
    pub request_timeout: Option<Duration>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LLM_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            fun_mode: false,
            web_search: false,
            stream: false,
            max_tokens: 1024,
            request_timeout: None,
        }
    }
}

impl LlmSettings {
    /// Checks the sampling parameters and endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparseable URL, an out-of-range
    /// temperature or a zero token cap.
    pub fn validate(&self) -> Result<()> {
        validate_url("LLM endpoint", &self.api_url)?;
        if self.model.trim().is_empty() {
            return Err(Error::Config("model identifier must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(Error::Config("max_tokens must be positive".into()));
        }
        Ok(())
    }
}

/// Settings for the web-search tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Search endpoint.
    pub api_url: String,
    /// Maximum number of results requested per query.
    pub max_results: u32,
    /// Search depth forwarded to the service (`basic` or `advanced`).
    pub search_depth: String,
    /// Per-request timeout.
    pub request_timeout: Option<Duration>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_SEARCH_URL.to_string(),
            max_results: 5,
            search_depth: "basic".to_string(),
            request_timeout: None,
        }
    }
}

impl SearchSettings {
    /// Checks the endpoint and result count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparseable URL or a zero result count.
    pub fn validate(&self) -> Result<()> {
        validate_url("search endpoint", &self.api_url)?;
        if self.max_results == 0 {
            return Err(Error::Config("max_results must be positive".into()));
        }
        Ok(())
    }
}

/// All non-secret settings for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Completion adapter settings.
    pub llm: LlmSettings,
    /// Search tool settings.
    pub search: SearchSettings,
}

fn validate_url(label: &str, url: &str) -> Result<()> {
    let parsed =
        reqwest::Url::parse(url).map_err(|e| Error::Config(format!("{label} `{url}`: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!("{label} `{url}`: unsupported scheme `{other}`"))),
    }
}
