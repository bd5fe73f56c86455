//! Error types for the deskpilot protocol layer.

mod extension;
mod tool;

pub use extension::*;
pub use tool::*;
