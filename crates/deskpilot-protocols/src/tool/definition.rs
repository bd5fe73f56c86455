//! Tool definition types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Metadata, RiskLevel};

/// Definition of a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique identifier for the tool.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Description of what the tool does.
    pub description: String,

    /// JSON Schema for the parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_schema: Option<serde_json::Value>,

    /// Versioned built-in tool type (e.g. `computer_20241022`).
    ///
    /// Tools with a type are advertised by type instead of by schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,

    /// Risk level for this tool.
    #[serde(default)]
    pub risk_level: RiskLevel,

    /// Additional metadata, merged into the advertised form of typed tools.
    #[serde(default)]
    pub metadata: Metadata,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            parameters_schema: None,
            tool_type: None,
            risk_level: RiskLevel::Low,
            metadata: HashMap::new(),
        }
    }

    /// Set the parameters schema.
    pub fn with_parameters_schema(mut self, schema: serde_json::Value) -> Self {
        self.parameters_schema = Some(schema);
        self
    }

    /// Set the built-in tool type.
    pub fn with_tool_type(mut self, tool_type: impl Into<String>) -> Self {
        self.tool_type = Some(tool_type.into());
        self
    }

    /// Set the risk level.
    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Convert to Anthropic tool format.
    pub fn to_anthropic_tool(&self) -> serde_json::Value {
        match &self.tool_type {
            Some(tool_type) => {
                let mut tool = serde_json::Map::new();
                tool.insert("type".to_string(), serde_json::json!(tool_type));
                tool.insert("name".to_string(), serde_json::json!(self.id));
                for (key, value) in &self.metadata {
                    tool.insert(key.clone(), value.clone());
                }
                serde_json::Value::Object(tool)
            }
            None => serde_json::json!({
                "name": self.id,
                "description": self.description,
                "input_schema": self.parameters_schema.clone().unwrap_or_else(empty_object_schema)
            }),
        }
    }
}

fn empty_object_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}
