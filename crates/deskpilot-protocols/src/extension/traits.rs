//! Extension and registry-access traits.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use super::{ExtensionContext, ExtensionManifest};
use crate::error::ExtensionError;
use crate::tool::Tool;

/// A loadable unit that contributes tools.
///
/// `initialize` is called once, with the extension's configuration; it
/// registers every tool listed in the manifest's `provides`.
#[async_trait]
pub trait Extension: Send + Sync + 'static {
    fn manifest(&self) -> &ExtensionManifest;

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError>;

    /// Release resources. Tools stay registered; the host is going away.
    async fn shutdown(&self) -> Result<(), ExtensionError> {
        Ok(())
    }

    /// For downcasting to the concrete extension type.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The part of the tool registry exposed to extensions.
pub trait ToolRegistryAccess: Send + Sync {
    /// Fails with [`ExtensionError::AlreadyRegistered`] on a duplicate id.
    fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError>;

    /// Fails with [`ExtensionError::NotFound`] for an unknown id.
    fn unregister_tool(&self, tool_id: &str) -> Result<(), ExtensionError>;
}
