//! Minimal agent runtime: consult every tool once, then ask the model.

use std::fmt::Write as _;

use tracing::{debug, info};

use crate::error::Error;
use crate::ports::{AgentFuture, AgentRuntime, CompletionRequest, LlmClient};
use crate::tools::ToolRegistry;

/// Output of one tool call, as shown to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Name of the tool that produced the output.
    pub tool: String,
    /// What the tool advertises itself as.
    pub description: String,
    /// Raw tool output.
    pub output: String,
}

/// Runs each registered tool with the query, then asks the model for a final
/// answer grounded in the tool observations.
///
/// There is no planning loop: one round of tool calls, one completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchAndAnswer;

impl SearchAndAnswer {
    /// Builds the single prompt handed to the model.
    #[must_use]
    pub fn compose_prompt(query: &str, observations: &[Observation]) -> String {
        if observations.is_empty() {
            return query.to_string();
        }

        let mut prompt = String::from(
            "Answer the question using the tool observations below. \
             If they do not contain the answer, say so.\n\n",
        );
        for Observation { tool, description, output } in observations {
            let _ = writeln!(prompt, "Observation from {tool} ({description}):\n{output}\n");
        }
        let _ = write!(prompt, "Question: {query}\nAnswer:");
        prompt
    }
}

impl AgentRuntime for SearchAndAnswer {
    fn plan_and_act<'a>(
        &'a self,
        llm: &'a dyn LlmClient,
        tools: &'a ToolRegistry,
        query: &'a str,
    ) -> AgentFuture<'a> {
        Box::pin(async move {
            let mut observations = Vec::with_capacity(tools.len());
            for tool in tools.iter() {
                debug!(tool = tool.name(), "invoking tool");
                let output = tool.invoke(query).await.map_err(|e| Error::Tool {
                    tool: tool.name().to_string(),
                    message: e.to_string(),
                })?;
                observations.push(Observation {
                    tool: tool.name().to_string(),
                    description: tool.description().to_string(),
                    output,
                });
            }

            let prompt = Self::compose_prompt(query, &observations);
            let response = llm.complete(&CompletionRequest::new(prompt)).await?;
            let answer = response.text.trim().to_string();
            info!(tools = observations.len(), answer_chars = answer.len(), "agent finished");
            Ok(answer)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CompletionResponse, LlmFuture, Tool, ToolFuture};
    use std::sync::Mutex;

    /// Remembers the last prompt and answers with a fixed text.
    struct EchoLlm {
        answer: &'static str,
        last_prompt: Mutex<Option<String>>,
    }

    impl EchoLlm {
        fn new(answer: &'static str) -> Self {
            Self { answer, last_prompt: Mutex::new(None) }
        }
    }

    impl LlmClient for EchoLlm {
        fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
            *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());
            let text = self.answer.to_string();
            Box::pin(async move { Ok(CompletionResponse { text }) })
        }
    }

    struct FixedTool {
        name: &'static str,
        output: Result<&'static str, Error>,
    }

    impl Tool for FixedTool {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "fixed"
        }
        fn invoke(&self, _input: &str) -> ToolFuture<'_> {
            let output = self.output.clone().map(str::to_string);
            Box::pin(async move { output })
        }
    }

    #[tokio::test]
    async fn answers_from_tool_observations() {
        let llm = EchoLlm::new("  Agentverse is a hub for autonomous agents.\n");
        let mut tools = ToolRegistry::new();
        tools
            .register(Box::new(FixedTool { name: "search", output: Ok("[agentverse.ai]") }))
            .unwrap();

        let answer =
            SearchAndAnswer.plan_and_act(&llm, &tools, "What is agentverse?").await.unwrap();
        assert_eq!(answer, "Agentverse is a hub for autonomous agents.");

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Observation from search (fixed):\n[agentverse.ai]"));
        assert!(prompt.ends_with("Question: What is agentverse?\nAnswer:"));
    }

    #[tokio::test]
    async fn without_tools_the_query_goes_straight_to_the_model() {
        let llm = EchoLlm::new("plain");
        let tools = ToolRegistry::new();
        let answer = SearchAndAnswer.plan_and_act(&llm, &tools, "hello").await.unwrap();
        assert_eq!(answer, "plain");
        assert_eq!(llm.last_prompt.lock().unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn tool_failure_names_the_tool_and_skips_the_model() {
        let llm = EchoLlm::new("unused");
        let mut tools = ToolRegistry::new();
        tools
            .register(Box::new(FixedTool {
                name: "search",
                output: Err(Error::Http { status: 401, body: "bad key".into() }),
            }))
            .unwrap();

        let err = SearchAndAnswer.plan_and_act(&llm, &tools, "q").await.unwrap_err();
        assert_eq!(err, Error::Tool { tool: "search".into(), message: "HTTP 401: bad key".into() });
        assert!(llm.last_prompt.lock().unwrap().is_none());
    }
}
