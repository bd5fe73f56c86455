//! Tool execution errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tool::ToolResult;

/// Coarse classification of a [`ToolError`].
///
/// Callers use the kind to decide between log-and-continue (validation) and
/// treating the failure as terminal for the current action sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request was malformed; nothing was executed.
    Validation,
    /// An external command failed, hung or produced unusable output.
    Execution,
    /// A file the tool expected to exist could not be produced or read.
    Resource,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Parameter validation failed: {0}")]
    ValidationFailed(String),

    #[error("Coordinates {x}, {y} are out of bounds")]
    OutOfBounds { x: u32, y: u32 },

    /// The command ran and exited unsuccessfully. `result` holds its stderr
    /// and any screenshot captured afterwards.
    #[error("Command failed: {message}")]
    CommandFailed { message: String, result: ToolResult },

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Tool execution timed out after {0} seconds")]
    Timeout(u64),

    #[error("Tool execution was cancelled")]
    Cancelled,

    #[error("Failed to take screenshot: {0}")]
    ScreenshotFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_)
            | Self::InvalidAction(_)
            | Self::ValidationFailed(_)
            | Self::OutOfBounds { .. } => ErrorKind::Validation,
            Self::CommandFailed { .. }
            | Self::ExecutionFailed(_)
            | Self::Timeout(_)
            | Self::Cancelled => ErrorKind::Execution,
            Self::ScreenshotFailed(_) | Self::Io(_) => ErrorKind::Resource,
        }
    }

    /// Whether this is an expected validation failure.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Partial result carried by a failed command, if any.
    pub fn partial_result(&self) -> Option<&ToolResult> {
        match self {
            Self::CommandFailed { result, .. } => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_not_found() {
        let err = ToolError::NotFound("computer".to_string());
        assert!(err.to_string().contains("Tool not found"));
        assert!(err.to_string().contains("computer"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_tool_error_invalid_action() {
        let err = ToolError::InvalidAction("scroll".to_string());
        assert_eq!(err.to_string(), "Invalid action: scroll");
        assert!(err.is_validation());
    }

    #[test]
    fn test_tool_error_validation_failed() {
        let err = ToolError::ValidationFailed("text is required for key".to_string());
        assert!(err.to_string().contains("validation failed"));
        assert!(err.to_string().contains("text is required for key"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_tool_error_out_of_bounds() {
        let err = ToolError::OutOfBounds { x: 1500, y: 390 };
        assert_eq!(err.to_string(), "Coordinates 1500, 390 are out of bounds");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_tool_error_command_failed_keeps_partial_result() {
        let partial = ToolResult::failure("no such key")
            .with_image("aW1hZ2U=");
        let err = ToolError::CommandFailed {
            message: "exit status 1".to_string(),
            result: partial.clone(),
        };
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(err.partial_result(), Some(&partial));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_tool_error_timeout() {
        let err = ToolError::Timeout(30);
        assert!(err.to_string().contains("timed out"));
        assert!(err.to_string().contains("30"));
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert!(err.partial_result().is_none());
    }

    #[test]
    fn test_tool_error_screenshot_failed() {
        let err = ToolError::ScreenshotFailed("could not create image".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to take screenshot: could not create image"
        );
        assert_eq!(err.kind(), ErrorKind::Resource);
    }

    #[test]
    fn test_tool_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert_eq!(err.kind(), ErrorKind::Resource);
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::Validation).unwrap();
        assert_eq!(json, "\"validation\"");
        let parsed: ErrorKind = serde_json::from_str("\"resource\"").unwrap();
        assert_eq!(parsed, ErrorKind::Resource);
    }
}
