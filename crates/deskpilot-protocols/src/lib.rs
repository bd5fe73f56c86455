//! # deskpilot Protocols
//!
//! Protocol definitions shared by every deskpilot crate.
//! Contains interface definitions and value types only - no OS access.
//!
//! ## Core Traits
//!
//! - [`Extension`] - Base trait for extensions that contribute tools
//! - [`Tool`] - Trait for tool implementations
//!
//! ## Core Values
//!
//! - [`ToolResult`] - Immutable output/error/screenshot triple
//! - [`ToolError`] - Failure of a single tool invocation, classified by [`ErrorKind`]

pub mod error;
pub mod extension;
pub mod tool;
pub mod types;

pub use error::{ErrorKind, ExtensionError, ToolError};
pub use extension::{Extension, ExtensionContext, ExtensionManifest};
pub use tool::{Tool, ToolContext, ToolDefinition, ToolResult, ToolResultPatch};
pub use types::*;
