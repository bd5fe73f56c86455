//! Registries for tools.

mod tool;

pub use tool::ToolRegistry;
