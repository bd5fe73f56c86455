//! X11 grammar: `xdotool`, `scrot`, ImageMagick `convert`.

use std::path::Path;

use super::{ClickKind, CommandBackend, CommandSpec};

/// Per-keystroke delay for `xdotool type`, in milliseconds.
const TYPING_DELAY_MS: u32 = 12;

#[derive(Debug, Clone, Copy, Default)]
pub struct XdotoolBackend;

fn xdotool() -> CommandSpec {
    CommandSpec::new("xdotool")
}

impl CommandBackend for XdotoolBackend {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    fn mouse_move(&self, x: u32, y: u32) -> CommandSpec {
        xdotool().args(["mousemove".to_string(), "--sync".to_string(), x.to_string(), y.to_string()])
    }

    fn left_click_drag(&self, x: u32, y: u32) -> CommandSpec {
        xdotool()
            .args(["mousemove".to_string(), "--sync".to_string(), x.to_string(), y.to_string()])
            .args(["mousedown", "1", "sleep", "0.1", "mouseup", "1"])
    }

    fn click(&self, kind: ClickKind) -> CommandSpec {
        let cmd = xdotool().arg("click");
        match kind {
            ClickKind::Left => cmd.arg("1"),
            ClickKind::Right => cmd.arg("3"),
            ClickKind::Middle => cmd.arg("2"),
            ClickKind::Double => cmd.args(["--repeat", "2", "--delay", "10", "1"]),
        }
    }

    fn key(&self, chord: &str) -> CommandSpec {
        xdotool().args(["key", "--", chord])
    }

    fn type_text(&self, chunk: &str) -> CommandSpec {
        xdotool()
            .arg("type")
            .arg("--delay")
            .arg(TYPING_DELAY_MS.to_string())
            .arg("--")
            .arg(chunk)
    }

    fn cursor_position(&self) -> CommandSpec {
        xdotool().args(["getmouselocation", "--shell"])
    }

    /// Reads the `X=` and `Y=` lines of `getmouselocation --shell`.
    fn parse_cursor_position(&self, stdout: &str) -> Option<(u32, u32)> {
        let mut x = None;
        let mut y = None;
        for line in stdout.lines() {
            if let Some(value) = line.trim().strip_prefix("X=") {
                x = value.parse().ok();
            } else if let Some(value) = line.trim().strip_prefix("Y=") {
                y = value.parse().ok();
            }
        }
        Some((x?, y?))
    }

    fn capture_screen(&self, path: &Path) -> CommandSpec {
        CommandSpec::new("scrot")
            .arg("-o")
            .arg(path.display().to_string())
    }

    fn resize_image(&self, path: &Path, max_side: u32) -> CommandSpec {
        let path = path.display().to_string();
        CommandSpec::new("convert")
            .arg(path.clone())
            .arg("-resize")
            .arg(format!("{}x{}", max_side, max_side))
            .arg(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(spec: &CommandSpec) -> Vec<&str> {
        std::iter::once(spec.program.as_str())
            .chain(spec.args.iter().map(String::as_str))
            .collect()
    }

    #[test]
    fn test_mouse_commands() {
        let b = XdotoolBackend;
        assert_eq!(
            argv(&b.mouse_move(683, 384)),
            ["xdotool", "mousemove", "--sync", "683", "384"]
        );
        assert_eq!(
            argv(&b.left_click_drag(5, 6)),
            ["xdotool", "mousemove", "--sync", "5", "6", "mousedown", "1", "sleep", "0.1", "mouseup", "1"]
        );
    }

    #[test]
    fn test_clicks() {
        let b = XdotoolBackend;
        assert_eq!(argv(&b.click(ClickKind::Left)), ["xdotool", "click", "1"]);
        assert_eq!(argv(&b.click(ClickKind::Right)), ["xdotool", "click", "3"]);
        assert_eq!(argv(&b.click(ClickKind::Middle)), ["xdotool", "click", "2"]);
        assert_eq!(
            argv(&b.click(ClickKind::Double)),
            ["xdotool", "click", "--repeat", "2", "--delay", "10", "1"]
        );
    }

    #[test]
    fn test_keyboard_commands() {
        let b = XdotoolBackend;
        assert_eq!(argv(&b.key("ctrl+a")), ["xdotool", "key", "--", "ctrl+a"]);
        assert_eq!(
            argv(&b.type_text("-n hello")),
            ["xdotool", "type", "--delay", "12", "--", "-n hello"]
        );
    }

    #[test]
    fn test_screen_commands() {
        let b = XdotoolBackend;
        let path = Path::new("/tmp/shot.png");
        assert_eq!(argv(&b.capture_screen(path)), ["scrot", "-o", "/tmp/shot.png"]);
        assert_eq!(
            argv(&b.resize_image(path, 1366)),
            ["convert", "/tmp/shot.png", "-resize", "1366x1366", "/tmp/shot.png"]
        );
    }

    #[test]
    fn test_parses_shell_position() {
        let stdout = "X=120\nY=45\nSCREEN=0\nWINDOW=65011713\n";
        assert_eq!(XdotoolBackend.parse_cursor_position(stdout), Some((120, 45)));
    }

    #[test]
    fn test_rejects_incomplete_position() {
        assert_eq!(XdotoolBackend.parse_cursor_position("X=120\n"), None);
        assert_eq!(XdotoolBackend.parse_cursor_position("120, 45"), None);
    }
}
