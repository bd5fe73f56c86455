//! Extension host.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use deskpilot_protocols::error::{ExtensionError, ToolError};
use deskpilot_protocols::extension::{Extension, ExtensionContext, ExtensionManifest};
use deskpilot_protocols::tool::{ToolContext, ToolResult};

use crate::registry::ToolRegistry;

/// Loads extensions into a shared tool registry and dispatches invocations.
pub struct Kernel {
    extensions: RwLock<Vec<Arc<dyn Extension>>>,
    tool_registry: Arc<ToolRegistry>,
    work_dir: PathBuf,
}

impl Kernel {
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            extensions: RwLock::new(Vec::new()),
            tool_registry: Arc::new(ToolRegistry::new()),
            work_dir,
        }
    }

    /// Initialize an extension with its configuration and keep it loaded.
    pub async fn load_extension(
        &self,
        mut extension: Box<dyn Extension>,
        config: serde_json::Value,
    ) -> Result<(), ExtensionError> {
        let id = extension.manifest().id.clone();
        if self.extensions.read().iter().any(|e| e.manifest().id == id) {
            return Err(ExtensionError::AlreadyRegistered(id));
        }

        let ctx = ExtensionContext::new(
            config,
            self.tool_registry.clone(),
            self.work_dir.clone(),
        );
        extension.initialize(ctx).await?;

        self.extensions.write().push(Arc::from(extension));
        info!("Extension loaded: {}", id);
        Ok(())
    }

    /// Shut down every loaded extension, most recent first.
    pub async fn shutdown(&self) {
        let extensions: Vec<_> = self.extensions.write().drain(..).rev().collect();
        for extension in extensions {
            let id = extension.manifest().id.clone();
            if let Err(e) = extension.shutdown().await {
                warn!("Failed to shut down {}: {}", id, e);
            }
        }
    }

    /// Execute a registered tool.
    pub async fn execute_tool(
        &self,
        tool_id: &str,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        self.tool_registry.execute(tool_id, params, ctx).await
    }

    /// Create a tool context rooted at the kernel's working directory.
    pub fn tool_context(&self, session_id: impl Into<String>) -> ToolContext {
        ToolContext::new(session_id, self.work_dir.clone())
    }

    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Manifests of all loaded extensions, in load order.
    pub fn list_extensions(&self) -> Vec<ExtensionManifest> {
        self.extensions
            .read()
            .iter()
            .map(|e| e.manifest().clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
