//! Registry of tools available to the agent runtime.

use tracing::debug;

use crate::error::{Error, Result};
use crate::ports::Tool;

/// Name-unique, insertion-ordered set of tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a tool with the same name is already registered.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        if self.get(tool.name()).is_some() {
            return Err(Error::Config(format!("tool `{}` is already registered", tool.name())));
        }
        debug!(tool = tool.name(), "registering tool");
        self.tools.push(tool);
        Ok(())
    }

    /// Looks a tool up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| &**t)
    }

    /// Iterates tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| &**t)
    }

    /// Names of all registered tools, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|t| t.name()).collect()
    }

    /// Consumes the registry, yielding the tools in registration order.
    #[must_use]
    pub fn into_boxed(self) -> Vec<Box<dyn Tool>> {
        self.tools
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ToolFuture;

    struct Named(&'static str);

    impl Tool for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "test tool"
        }
        fn invoke(&self, input: &str) -> ToolFuture<'_> {
            let echoed = format!("{}:{input}", self.0);
            Box::pin(async move { Ok(echoed) })
        }
    }

    #[test]
    fn keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Named("search"))).unwrap();
        registry.register(Box::new(Named("weather"))).unwrap();
        assert_eq!(registry.names(), vec!["search", "weather"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("weather").is_some());
        assert!(registry.get("calculator").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Named("search"))).unwrap();
        let err = registry.register(Box::new(Named("search"))).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("already registered")));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn registered_tools_are_invocable() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Named("search"))).unwrap();
        let output = registry.get("search").unwrap().invoke("rust").await.unwrap();
        assert_eq!(output, "search:rust");
    }
}
