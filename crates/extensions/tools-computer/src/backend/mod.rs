//! External command grammars for input injection and screen capture.
//!
//! A backend only builds [`CommandSpec`]s; running them is the job of
//! [`CommandRunner`](crate::CommandRunner).

mod cliclick;
mod xdotool;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use cliclick::CliclickBackend;
pub use xdotool::XdotoolBackend;

/// A program and its argument vector. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Mouse button action performed at the current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Left,
    Right,
    Middle,
    Double,
}

/// Which family of external utilities to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// `cliclick`, `screencapture` and `sips` (macOS).
    Cliclick,
    /// `xdotool`, `scrot` and ImageMagick `convert` (X11).
    Xdotool,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cliclick => "cliclick",
            Self::Xdotool => "xdotool",
        }
    }

    /// Build the backend this kind names.
    pub fn create(&self) -> Arc<dyn CommandBackend> {
        match self {
            Self::Cliclick => Arc::new(CliclickBackend),
            Self::Xdotool => Arc::new(XdotoolBackend),
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Cliclick
        } else {
            Self::Xdotool
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cliclick" => Ok(Self::Cliclick),
            "xdotool" => Ok(Self::Xdotool),
            other => Err(format!("unknown backend: {}", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command grammar for one family of desktop utilities.
///
/// Coordinates passed in are already in display pixel space.
pub trait CommandBackend: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    fn mouse_move(&self, x: u32, y: u32) -> CommandSpec;

    /// Press the left button at `(x, y)` and release it there after a short hold.
    fn left_click_drag(&self, x: u32, y: u32) -> CommandSpec;

    fn click(&self, kind: ClickKind) -> CommandSpec;

    /// Press a key or chord, e.g. `Return` or `ctrl+a`.
    fn key(&self, chord: &str) -> CommandSpec;

    /// Type one chunk of literal text.
    fn type_text(&self, chunk: &str) -> CommandSpec;

    /// Print the cursor position on stdout.
    fn cursor_position(&self) -> CommandSpec;

    /// Parse the stdout of [`cursor_position`](Self::cursor_position).
    fn parse_cursor_position(&self, stdout: &str) -> Option<(u32, u32)> {
        parse_comma_pair(stdout)
    }

    /// Write a PNG of the whole display to `path`.
    fn capture_screen(&self, path: &Path) -> CommandSpec;

    /// Shrink the image at `path` in place so its longest side is `max_side`.
    fn resize_image(&self, path: &Path, max_side: u32) -> CommandSpec;
}

/// Parse `"x, y"` (whitespace around either number is ignored).
pub fn parse_comma_pair(s: &str) -> Option<(u32, u32)> {
    let (x, y) = s.trim().split_once(',')?;
    let x = x.trim().parse().ok()?;
    let y = y.trim().parse().ok()?;
    Some((x, y))
}
