//! Extension protocol definitions.
//!
//! Extensions contribute tools to a registry at startup.

mod traits;
mod manifest;
mod context;

pub use traits::*;
pub use manifest::*;
pub use context::*;
