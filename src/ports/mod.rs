//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the handler and an external
//! system (language model, tools, agent runtime). Implementations live in
//! `src/adapters/` and `src/agent.rs`.

pub mod agent;
pub mod llm;
pub mod tool;

pub use agent::{AgentFuture, AgentRuntime};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};
pub use tool::{Tool, ToolFuture};
