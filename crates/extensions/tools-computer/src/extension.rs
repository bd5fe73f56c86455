//! Computer tools extension.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use deskpilot_protocols::error::ExtensionError;
use deskpilot_protocols::extension::{Extension, ExtensionContext, ExtensionManifest, Provides};
use deskpilot_protocols::types::Version;

use crate::computer::ComputerTool;
use crate::config::DisplayConfig;

/// Registers the `computer` tool, configured from the extension config.
pub struct ComputerToolsExtension {
    manifest: ExtensionManifest,
}

impl ComputerToolsExtension {
    pub fn new() -> Self {
        let mut manifest = ExtensionManifest::new(
            "tools-computer",
            "Computer Tools",
            Version::new(0, 1, 0),
        )
        .with_description("Mouse, keyboard, screenshot and cursor control for one display");
        manifest.provides = Provides {
            tools: vec![ComputerTool::ID.to_string()],
        };

        Self { manifest }
    }
}

impl Default for ComputerToolsExtension {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extension for ComputerToolsExtension {
    fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError> {
        let config = resolve_config(&ctx.config, &ctx.work_dir)?;

        info!(
            width = config.width,
            height = config.height,
            backend = %config.backend,
            output_dir = %config.output_dir.display(),
            "Computer tool configured"
        );
        ctx.tool_registry
            .register_tool(Arc::new(ComputerTool::new(config)))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Parse and validate the tool config. A relative `output_dir` is taken
/// relative to `work_dir`.
fn resolve_config(
    value: &serde_json::Value,
    work_dir: &Path,
) -> Result<DisplayConfig, ExtensionError> {
    let mut config = DisplayConfig::from_extension_config(value)?;
    if config.output_dir.is_relative() {
        config.output_dir = work_dir.join(&config.output_dir);
    }
    config.validate()?;
    Ok(config)
}
