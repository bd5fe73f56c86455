//! Tool execution result types.

use serde::{Deserialize, Serialize};

/// Result of a tool execution.
///
/// Values are never modified after construction; [`ToolResult::replace`]
/// derives a new result instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Standard output of the underlying command(s).
    #[serde(default)]
    pub output: String,

    /// Standard error of the underlying command(s).
    #[serde(default)]
    pub error: String,

    /// PNG screenshot, base64-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
}

/// Fields to override when deriving a result with [`ToolResult::replace`].
///
/// `None` keeps the receiver's value.
#[derive(Debug, Clone, Default)]
pub struct ToolResultPatch {
    pub output: Option<String>,
    pub error: Option<String>,
    pub base64_image: Option<String>,
}

impl ToolResultPatch {
    pub fn output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Default::default()
        }
    }

    pub fn image(base64_image: impl Into<String>) -> Self {
        Self {
            base64_image: Some(base64_image.into()),
            ..Default::default()
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl ToolResult {
    /// Create a result from all three parts.
    pub fn new(
        output: impl Into<String>,
        error: impl Into<String>,
        base64_image: Option<String>,
    ) -> Self {
        Self {
            output: output.into(),
            error: error.into(),
            base64_image,
        }
    }

    /// Create a result carrying only output text.
    pub fn success(output: impl Into<String>) -> Self {
        Self::new(output, String::new(), None)
    }

    /// Create a result carrying only error text.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::new(String::new(), error, None)
    }

    /// Attach a screenshot.
    pub fn with_image(self, base64_image: impl Into<String>) -> Self {
        Self {
            base64_image: Some(base64_image.into()),
            ..self
        }
    }

    /// Derive a new result, overriding only the fields set in `patch`.
    pub fn replace(&self, patch: ToolResultPatch) -> Self {
        Self {
            output: patch.output.unwrap_or_else(|| self.output.clone()),
            error: patch.error.unwrap_or_else(|| self.error.clone()),
            base64_image: patch.base64_image.or_else(|| self.base64_image.clone()),
        }
    }

    /// Whether any error text was captured.
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Whether a screenshot is attached.
    pub fn has_image(&self) -> bool {
        self.base64_image.is_some()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
