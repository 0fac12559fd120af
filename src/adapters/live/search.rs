//! Live adapter for the `Tool` port backed by the Tavily search API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SearchSettings;
use crate::error::{Error, Result};
use crate::ports::tool::{Tool, ToolFuture};

/// Registered name of the search tool.
pub const SEARCH_TOOL_NAME: &str = "tavily_search_results_json";

/// Description the search tool advertises to the agent runtime.
pub const SEARCH_TOOL_DESCRIPTION: &str = "A search engine optimized for comprehensive, accurate, \
     and trusted results. Useful for when you need to answer questions about current events. \
     Input should be a search query.";

/// Web search tool calling Tavily.
pub struct TavilySearchTool {
    client: Client,
    api_key: String,
    settings: SearchSettings,
}

impl TavilySearchTool {
    /// Creates the tool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the key is empty or the settings are invalid.
    pub fn new(api_key: impl Into<String>, settings: SearchSettings) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Config("search API key must not be empty".into()));
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

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        debug!(query, max_results = self.settings.max_results, "performing web search");

        let body = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results: self.settings.max_results,
            search_depth: &self.settings.search_depth,
        };

        let response = self.client.post(&self.settings.api_url).json(&body).send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "web search rejected");
            return Err(Error::Http { status: status.as_u16(), body: response_text });
        }

        let parsed: SearchResponse = serde_json::from_str(&response_text)
            .map_err(|e| Error::MalformedResponse(format!("search response: {e}")))?;

        let hits: Vec<SearchHit> = parsed
            .results
            .into_iter()
            .map(|r| SearchHit { url: r.url, content: r.content })
            .collect();
        debug!(result_count = hits.len(), "web search completed");
        Ok(hits)
    }
}

/// Request body sent to the search endpoint.
#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
}

/// Top-level search response; only the fields the tool uses.
#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// A single result in the search response.
#[derive(Deserialize)]
struct SearchResult {
    url: String,
    #[serde(default)]
    content: String,
}

/// What the tool hands back to the agent for each result.
#[derive(Debug, Serialize)]
struct SearchHit {
    url: String,
    content: String,
}

impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        SEARCH_TOOL_DESCRIPTION
    }

    fn invoke(&self, input: &str) -> ToolFuture<'_> {
        let query = input.to_string();
        Box::pin(async move {
            let hits = self.search(&query).await?;
            serde_json::to_string(&hits)
                .map_err(|e| Error::Tool { tool: SEARCH_TOOL_NAME.into(), message: e.to_string() })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> SearchSettings {
        SearchSettings { api_url: format!("{}/search", server.uri()), ..SearchSettings::default() }
    }

    #[tokio::test]
    async fn renders_results_as_url_and_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({
                "api_key": "tvly-key",
                "query": "What is agentverse?",
                "max_results": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "What is agentverse?",
                "results": [
                    {
                        "title": "Agentverse",
                        "url": "https://agentverse.ai",
                        "content": "Agent hub",
                        "score": 0.9
                    },
                    {"title": "Docs", "url": "https://docs.example", "content": "Guides"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = TavilySearchTool::new("tvly-key", settings_for(&server)).unwrap();
        let output = tool.invoke("What is agentverse?").await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!([
                {"url": "https://agentverse.ai", "content": "Agent hub"},
                {"url": "https://docs.example", "content": "Guides"}
            ])
        );
    }

    #[tokio::test]
    async fn missing_results_render_as_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"query": "x"})))
            .mount(&server)
            .await;

        let tool = TavilySearchTool::new("tvly-key", settings_for(&server)).unwrap();
        assert_eq!(tool.invoke("x").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn rejected_search_is_an_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(432).set_body_string("plan limit reached"))
            .mount(&server)
            .await;

        let tool = TavilySearchTool::new("tvly-key", settings_for(&server)).unwrap();
        let err = tool.invoke("x").await.unwrap_err();
        assert_eq!(err, Error::Http { status: 432, body: "plan limit reached".into() });
    }

    #[test]
    fn requires_a_key() {
        assert!(TavilySearchTool::new("", SearchSettings::default()).is_err());
        let tool = TavilySearchTool::new("k", SearchSettings::default()).unwrap();
        assert_eq!(tool.name(), SEARCH_TOOL_NAME);
    }
}
