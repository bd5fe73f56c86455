//! Computer-control tool for deskpilot.
//!
//! Provides a single tool, `computer`, that accepts display-agnostic actions
//! and turns them into external input-injection and screen-capture commands:
//!
//! - `mouse_move`, `left_click_drag` - take a `coordinate`
//! - `key`, `type` - take `text`
//! - `left_click`, `right_click`, `middle_click`, `double_click` - act at the cursor
//! - `screenshot` - capture the display
//! - `cursor_position` - report the cursor in the caller's coordinate space
//!
//! Coordinates are translated between the caller's space and the display's
//! pixel space by [`CoordinateScaler`].

mod action;
mod backend;
mod chunk;
mod computer;
mod config;
mod executor;
mod extension;
mod runner;
mod scaling;
mod screenshot;

#[cfg(test)]
mod testing;

pub use action::{Action, ActionRequest, ValidatedAction};
pub use backend::{
    parse_comma_pair, BackendKind, ClickKind, CliclickBackend, CommandBackend, CommandSpec,
    XdotoolBackend,
};
pub use chunk::{chunk_text, TYPING_CHUNK_SIZE};
pub use computer::{ComputerTool, DisplayOptions};
pub use config::DisplayConfig;
pub use executor::ShellExecutor;
pub use extension::ComputerToolsExtension;
pub use runner::{CommandOutput, CommandRunner};
pub use scaling::{CoordinateScaler, ScaleDirection, ScalingTarget, SCALING_TARGETS};
pub use screenshot::ScreenshotService;
