//! macOS grammar: `cliclick`, `screencapture`, `sips`.

use std::path::Path;

use super::{ClickKind, CommandBackend, CommandSpec};

#[derive(Debug, Clone, Copy, Default)]
pub struct CliclickBackend;

fn cliclick(command: String) -> CommandSpec {
    CommandSpec::new("cliclick").arg(command)
}

impl CommandBackend for CliclickBackend {
    fn name(&self) -> &'static str {
        "cliclick"
    }

    fn mouse_move(&self, x: u32, y: u32) -> CommandSpec {
        cliclick(format!("m:{},{}", x, y))
    }

    fn left_click_drag(&self, x: u32, y: u32) -> CommandSpec {
        CommandSpec::new("cliclick").args([
            format!("dd:{},{}", x, y),
            "w:100".to_string(),
            format!("du:{},{}", x, y),
        ])
    }

    fn click(&self, kind: ClickKind) -> CommandSpec {
        let command = match kind {
            ClickKind::Left => "c:.",
            ClickKind::Right => "rc:.",
            ClickKind::Middle => "mc:.",
            ClickKind::Double => "dc:.",
        };
        cliclick(command.to_string())
    }

    fn key(&self, chord: &str) -> CommandSpec {
        cliclick(format!("kp:{}", chord))
    }

    fn type_text(&self, chunk: &str) -> CommandSpec {
        cliclick(format!("t:{}", chunk))
    }

    fn cursor_position(&self) -> CommandSpec {
        cliclick("p:".to_string())
    }

    fn capture_screen(&self, path: &Path) -> CommandSpec {
        CommandSpec::new("screencapture")
            .arg("-x")
            .arg(path.display().to_string())
    }

    fn resize_image(&self, path: &Path, max_side: u32) -> CommandSpec {
        CommandSpec::new("sips")
            .arg("-Z")
            .arg(max_side.to_string())
            .arg(path.display().to_string())
    }
}
