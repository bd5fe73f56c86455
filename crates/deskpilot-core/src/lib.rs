//! # deskpilot Core
//!
//! Extension host for deskpilot.
//!
//! ## Components
//!
//! - [`Kernel`] - Loads extensions and dispatches tool invocations
//! - [`ToolRegistry`] - Tools contributed by extensions, keyed by id

pub mod kernel;
pub mod registry;

pub use kernel::Kernel;
pub use registry::ToolRegistry;
