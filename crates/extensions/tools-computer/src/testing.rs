//! Scripted backend that runs `sh -c` snippets instead of desktop utilities.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{ClickKind, CommandBackend, CommandSpec};

/// Base64 of the bytes written by [`CaptureBehavior::WritePng`].
pub const FAKE_PNG_BASE64: &str = "ZmFrZXBuZw==";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureBehavior {
    WritePng,
    /// Writes the image, then reports a warning and exits non-zero.
    WriteThenFail,
    NoFile,
    Fail,
}

/// Records a label for every command it builds.
pub struct ScriptedBackend {
    log: Arc<Mutex<Vec<String>>>,
    capture: CaptureBehavior,
    fail_keys: bool,
    fail_resize: bool,
    cursor_output: String,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            capture: CaptureBehavior::WritePng,
            fail_keys: false,
            fail_resize: false,
            cursor_output: "120, 45".to_string(),
        }
    }

    pub fn with_capture(mut self, capture: CaptureBehavior) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_failing_keys(mut self) -> Self {
        self.fail_keys = true;
        self
    }

    pub fn with_failing_resize(mut self) -> Self {
        self.fail_resize = true;
        self
    }

    pub fn with_cursor_output(mut self, output: impl Into<String>) -> Self {
        self.cursor_output = output.into();
        self
    }

    /// Shared handle to the issued-command log.
    pub fn log(&self) -> Arc<Mutex<Vec<String>>> {
        self.log.clone()
    }

    fn record(&self, label: String, script: &str, arg: &str) -> CommandSpec {
        self.log.lock().push(label);
        CommandSpec::new("sh")
            .arg("-c")
            .arg(script)
            .arg("sh")
            .arg(arg)
    }
}

impl CommandBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn mouse_move(&self, x: u32, y: u32) -> CommandSpec {
        self.record(format!("mouse_move {} {}", x, y), "true", "")
    }

    fn left_click_drag(&self, x: u32, y: u32) -> CommandSpec {
        self.record(format!("drag {} {}", x, y), "true", "")
    }

    fn click(&self, kind: ClickKind) -> CommandSpec {
        self.record(format!("click {:?}", kind).to_lowercase(), "true", "")
    }

    fn key(&self, chord: &str) -> CommandSpec {
        let script = if self.fail_keys {
            "echo \"unknown key: $1\" >&2; exit 1"
        } else {
            "true"
        };
        self.record(format!("key {}", chord), script, chord)
    }

    fn type_text(&self, chunk: &str) -> CommandSpec {
        self.record(format!("type {}", chunk), "printf %s \"$1\"", chunk)
    }

    fn cursor_position(&self) -> CommandSpec {
        self.record("cursor".to_string(), "printf '%s\\n' \"$1\"", &self.cursor_output)
    }

    fn capture_screen(&self, path: &Path) -> CommandSpec {
        let script = match self.capture {
            CaptureBehavior::WritePng => "printf fakepng > \"$1\"",
            CaptureBehavior::WriteThenFail => {
                "printf fakepng > \"$1\"; echo 'capture warning' >&2; exit 1"
            }
            CaptureBehavior::NoFile => "true",
            CaptureBehavior::Fail => {
                "echo 'could not create image from display' >&2; exit 1"
            }
        };
        let path = path.display().to_string();
        self.record(format!("capture {}", path), script, &path)
    }

    fn resize_image(&self, path: &Path, max_side: u32) -> CommandSpec {
        let script = if self.fail_resize {
            "echo 'resize failed' >&2; exit 1"
        } else {
            "true"
        };
        let path = path.display().to_string();
        self.record(format!("resize {} {}", max_side, path), script, &path)
    }
}
