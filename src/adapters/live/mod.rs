//! Live adapters for real external interactions.

pub mod llm;
pub mod search;

pub use llm::ChatCompletionsClient;
pub use search::{TavilySearchTool, SEARCH_TOOL_DESCRIPTION, SEARCH_TOOL_NAME};
