//! Common types used across deskpilot.

mod common;

pub use common::*;
