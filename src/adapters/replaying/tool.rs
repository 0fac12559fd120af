//! Replaying adapter for the `Tool` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Tool, ToolFuture};

/// Serves recorded tool outputs from a cassette under a fixed tool name.
pub struct ReplayingTool {
    name: String,
    description: String,
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingTool {
    /// Create a replaying tool backed by the given replayer.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        replayer: Arc<Mutex<CassetteReplayer>>,
    ) -> Self {
        Self { name: name.into(), description: description.into(), replayer: Some(replayer) }
    }

    /// Create a replaying tool with no cassette. Every call fails.
    pub fn unconfigured(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), replayer: None }
    }
}

impl Tool for ReplayingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn invoke(&self, _input: &str) -> ToolFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "tool", &self.name);
        Box::pin(async move { replay_result(output) })
    }
}
