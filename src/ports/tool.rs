//! Tool port: a capability the agent runtime may invoke while answering.

use std::future::Future;
use std::pin::Pin;

use crate::error::Error;

/// Boxed future returned by [`Tool::invoke`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<String, Error>> + Send + 'a>>;

/// A named capability taking text input and producing text output.
///
/// Abstracting tools allows deterministic replay and testing without touching
/// a real search API.
pub trait Tool: Send + Sync {
    /// Unique name under which the tool is registered.
    fn name(&self) -> &str;

    /// Human-readable description of what the tool is good for.
    fn description(&self) -> &str;

    /// Runs the tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying service call fails.
    fn invoke(&self, input: &str) -> ToolFuture<'_>;
}
