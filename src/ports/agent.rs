//! Agent runtime port: turns a query into a final answer.

use std::future::Future;
use std::pin::Pin;

use super::llm::LlmClient;
use crate::error::Error;
use crate::tools::ToolRegistry;

/// Boxed future returned by [`AgentRuntime::plan_and_act`].
pub type AgentFuture<'a> = Pin<Box<dyn Future<Output = Result<String, Error>> + Send + 'a>>;

/// Answers a query using a language model and a set of registered tools.
///
/// How tools are chosen and how prompts are built is entirely up to the
/// implementation; callers only see the final text.
pub trait AgentRuntime: Send + Sync {
    /// Produces the final answer for `query`.
    ///
    /// # Errors
    ///
    /// Returns the failing tool's or model's error, or [`Error::Agent`].
    fn plan_and_act<'a>(
        &'a self,
        llm: &'a dyn LlmClient,
        tools: &'a ToolRegistry,
        query: &'a str,
    ) -> AgentFuture<'a>;
}
