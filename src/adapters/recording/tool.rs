//! Recording adapter for the `Tool` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{Tool, ToolFuture};

/// Records tool invocations while delegating to an inner implementation.
///
/// Interactions are stored under port `"tool"` with the tool name as method.
pub struct RecordingTool {
    inner: Box<dyn Tool>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingTool {
    /// Creates a new recording tool wrapping the given implementation.
    pub fn new(inner: Box<dyn Tool>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct InvokeInput<'a> {
    input: &'a str,
}

impl Tool for RecordingTool {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn invoke(&self, input: &str) -> ToolFuture<'_> {
        let input = input.to_string();
        Box::pin(async move {
            let result = self.inner.invoke(&input).await;
            let recorded = InvokeInput { input: &input };
            record_result(&self.recorder, "tool", self.inner.name(), &recorded, &result);
            result
        })
    }
}
