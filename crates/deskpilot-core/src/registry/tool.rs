//! Tool registry for managing available tools.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use deskpilot_protocols::error::{ExtensionError, ToolError};
use deskpilot_protocols::extension::ToolRegistryAccess;
use deskpilot_protocols::tool::{Tool, ToolContext, ToolDefinition, ToolResult};

/// Tools contributed by extensions, keyed by definition id.
pub struct ToolRegistry {
    tools: DashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
        }
    }

    /// Register a tool under its definition id. Ids are unique.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        let id = tool.definition().id.clone();
        match self.tools.entry(id) {
            Entry::Occupied(entry) => {
                Err(ExtensionError::AlreadyRegistered(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                debug!(tool = %entry.key(), "Tool registered");
                entry.insert(tool);
                Ok(())
            }
        }
    }

    pub fn unregister(&self, id: &str) -> Result<(), ExtensionError> {
        self.tools
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ExtensionError::NotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool definitions, sorted by id.
    pub fn list(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<_> = self
            .tools
            .iter()
            .map(|entry| entry.value().definition().clone())
            .collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        definitions
    }

    /// Look up a tool, validate the parameters and execute it.
    pub async fn execute(
        &self,
        id: &str,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(id)
            .ok_or_else(|| ToolError::NotFound(id.to_string()))?;
        tool.validate(&params)?;
        debug!(tool = id, correlation_id = %ctx.correlation_id, "Executing tool");
        tool.execute(params, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistryAccess for ToolRegistry {
    fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        self.register(tool)
    }

    fn unregister_tool(&self, tool_id: &str) -> Result<(), ExtensionError> {
        self.unregister(tool_id)
    }
}
