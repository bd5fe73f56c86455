//! Errors raised while loading extensions and registering their tools.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    /// No extension or tool with this id.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    /// The configuration handed to the extension cannot be used.
    #[error("Invalid extension config: {0}")]
    InvalidConfig(String),
}
