//! Service context bundling the model, the tools and the agent runtime.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{
    ChatCompletionsClient, TavilySearchTool, SEARCH_TOOL_DESCRIPTION, SEARCH_TOOL_NAME,
};
use crate::adapters::recording::{RecordingLlmClient, RecordingTool};
use crate::adapters::replaying::{ReplayingLlmClient, ReplayingTool};
use crate::agent::SearchAndAnswer;
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::{ApiKeys, Settings};
use crate::error::Result;
use crate::ports::{AgentRuntime, LlmClient};
use crate::tools::ToolRegistry;

/// Bundles every port into a single context.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying); [`ServiceContext::run`] is the same for all of them.
pub struct ServiceContext {
    /// LLM client for completions.
    pub llm: Box<dyn LlmClient>,
    /// Tools the agent may invoke.
    pub tools: ToolRegistry,
    /// Agent runtime turning a query into an answer.
    pub agent: Box<dyn AgentRuntime>,
}

impl ServiceContext {
    /// Assembles a context from explicit parts.
    #[must_use]
    pub fn new(llm: Box<dyn LlmClient>, tools: ToolRegistry, agent: Box<dyn AgentRuntime>) -> Self {
        Self { llm, tools, agent }
    }

    /// Creates a live context talking to the real chat-completions and search services.
    ///
    /// # Errors
    ///
    /// Returns an error if any adapter rejects its settings.
    pub fn live(keys: &ApiKeys, settings: &Settings) -> Result<Self> {
        let llm = ChatCompletionsClient::new(&keys.llm, settings.llm.clone())?;
        let search = TavilySearchTool::new(&keys.search, settings.search.clone())?;

        let mut tools = ToolRegistry::new();
        tools.register(Box::new(search))?;
        Ok(Self::new(Box::new(llm), tools, Box::new(SearchAndAnswer)))
    }

    /// Creates a live context whose port traffic is captured by `session`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if any adapter rejects its settings.
    pub fn recording(
        keys: &ApiKeys,
        settings: &Settings,
        session: &RecordingSession,
    ) -> Result<Self> {
        let live = Self::live(keys, settings)?;

        let mut tools = ToolRegistry::new();
        for tool in live.tools.into_boxed() {
            tools.register(Box::new(RecordingTool::new(tool, Arc::clone(&session.tool))))?;
        }
        let llm = RecordingLlmClient::new(live.llm, Arc::clone(&session.llm));
        Ok(Self::new(Box::new(llm), tools, live.agent))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        Self::replaying_from(&CassetteConfig::monolithic(path))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette fail with a cassette error when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self> {
        let replayers = config.load_all()?;

        let llm = match replayers.llm {
            Some(r) => ReplayingLlmClient::new(Arc::new(Mutex::new(r))),
            None => ReplayingLlmClient::unconfigured(),
        };
        let (name, description) = (SEARCH_TOOL_NAME, SEARCH_TOOL_DESCRIPTION);
        let search = match replayers.tool {
            Some(r) => ReplayingTool::new(name, description, Arc::new(Mutex::new(r))),
            None => ReplayingTool::unconfigured(name, description),
        };

        let mut tools = ToolRegistry::new();
        tools.register(Box::new(search))?;
        Ok(Self::new(Box::new(llm), tools, Box::new(SearchAndAnswer)))
    }

    /// Answers `query` with this context's agent runtime.
    ///
    /// # Errors
    ///
    /// Propagates the runtime's error unchanged.
    pub async fn run(&self, query: &str) -> Result<String> {
        self.agent.plan_and_act(self.llm.as_ref(), &self.tools, query).await
    }
}
