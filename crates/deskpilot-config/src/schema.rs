//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default display width in pixels.
pub const DEFAULT_WIDTH: u32 = 1400;

/// Default display height in pixels.
pub const DEFAULT_HEIGHT: u32 = 780;

/// Default settle time before a follow-up screenshot.
pub const DEFAULT_SCREENSHOT_DELAY_SECS: f64 = 2.0;

/// Default limit on a single external command.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,

    #[serde(default)]
    pub screenshot: ScreenshotSection,

    #[serde(default)]
    pub execution: ExecutionSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// The single display the tool drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// X display number, exported to child processes as `DISPLAY=:<n>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_number: Option<u32>,

    #[serde(default = "default_true")]
    pub scaling_enabled: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            display_number: None,
            scaling_enabled: true,
        }
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_true() -> bool {
    true
}

/// Screenshot capture settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotSection {
    /// Settle time between an input action and the screenshot that follows it.
    #[serde(default = "default_delay_secs")]
    pub delay_secs: f64,

    /// Where screenshots are written. Defaults to `<tmp>/outputs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ScreenshotSection {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            output_dir: None,
        }
    }
}

fn default_delay_secs() -> f64 {
    DEFAULT_SCREENSHOT_DELAY_SECS
}

/// External command settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSection {
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// `cliclick` or `xdotool`. Chosen from the target OS when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout(),
            backend: None,
        }
    }
}

fn default_command_timeout() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}

/// Backends the computer tool knows how to drive.
pub const KNOWN_BACKENDS: &[&str] = &["cliclick", "xdotool"];

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Also write a daily-rotated log file.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: true,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
