//! Extension manifest types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Metadata, Version};

/// Extension manifest containing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    pub id: String,
    pub name: String,
    pub version: Version,
    pub description: String,
    #[serde(default)]
    pub provides: Provides,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_schema: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl ExtensionManifest {
    /// Create a new extension manifest.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version,
            description: String::new(),
            provides: Provides::default(),
            config_schema: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// What an extension provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Provides {
    #[serde(default)]
    pub tools: Vec<String>,
}
