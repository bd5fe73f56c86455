//! Run one command and optionally follow it with a screenshot.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use deskpilot_protocols::error::ToolError;
use deskpilot_protocols::tool::ToolResult;

use crate::backend::CommandSpec;
use crate::runner::CommandRunner;
use crate::screenshot::ScreenshotService;

pub struct ShellExecutor {
    runner: Arc<CommandRunner>,
    screenshots: Arc<ScreenshotService>,
    settle_delay: Duration,
}

impl ShellExecutor {
    pub fn new(
        runner: Arc<CommandRunner>,
        screenshots: Arc<ScreenshotService>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            runner,
            screenshots,
            settle_delay,
        }
    }

    pub fn screenshots(&self) -> &ScreenshotService {
        &self.screenshots
    }

    /// Run `spec`. With `capture_screenshot`, wait for the display to settle
    /// and attach a screenshot, also when the command failed.
    ///
    /// A non-zero exit becomes [`ToolError::CommandFailed`] carrying the
    /// command's stderr and the screenshot, if one could be taken.
    pub async fn execute(
        &self,
        spec: &CommandSpec,
        capture_screenshot: bool,
    ) -> Result<ToolResult, ToolError> {
        let output = self.runner.run(spec).await?;

        let capture = if capture_screenshot {
            tokio::time::sleep(self.settle_delay).await;
            Some(self.screenshots.capture().await)
        } else {
            None
        };

        if output.success {
            let image = capture.transpose()?.and_then(|shot| shot.base64_image);
            return Ok(ToolResult::new(output.stdout, output.stderr, image));
        }

        // The command's own failure outranks a failed follow-up capture.
        let image = match capture {
            Some(Ok(shot)) => shot.base64_image,
            Some(Err(e)) => {
                warn!(command = %spec, error = %e, "Screenshot after failed command also failed");
                None
            }
            None => None,
        };

        let message = match output.code {
            Some(code) => format!("{} exited with code {}", spec.program, code),
            None => format!("{} was terminated by a signal", spec.program),
        };
        warn!(command = %spec, stderr = %output.stderr.trim(), "{}", message);
        Err(ToolError::CommandFailed {
            message,
            result: ToolResult::new(String::new(), output.stderr, image),
        })
    }
}
