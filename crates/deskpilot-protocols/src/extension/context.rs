//! What an extension receives when it is loaded.

use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::ToolRegistryAccess;

#[derive(Clone)]
pub struct ExtensionContext {
    /// The extension's configuration. For the computer tool this is the
    /// whole config document (`display`, `screenshot`, `execution` ...).
    pub config: serde_json::Value,

    /// Where the extension registers its tools.
    pub tool_registry: Arc<dyn ToolRegistryAccess>,

    /// Base for relative paths in `config`.
    pub work_dir: PathBuf,
}

impl ExtensionContext {
    pub fn new(
        config: serde_json::Value,
        tool_registry: Arc<dyn ToolRegistryAccess>,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            config,
            tool_registry,
            work_dir,
        }
    }

    /// Deserialize one top-level config entry. `None` when absent or
    /// of the wrong shape.
    pub fn get_config<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.config.get(key)?;
        T::deserialize(value).ok()
    }
}
