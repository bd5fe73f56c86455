//! Bounded execution of external commands.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use deskpilot_protocols::error::ToolError;

use crate::backend::CommandSpec;

/// Captured outcome of one finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs [`CommandSpec`]s with a timeout and the configured X display.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
    display_number: Option<u32>,
}

impl CommandRunner {
    pub fn new(timeout: Duration, display_number: Option<u32>) -> Self {
        Self {
            timeout,
            display_number,
        }
    }

    /// Run a command to completion and capture its output.
    ///
    /// A non-zero exit is not an error here; callers inspect
    /// [`CommandOutput::success`]. The child is killed when the timeout fires.
    pub async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ToolError> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(display) = self.display_number {
            cmd.env("DISPLAY", format!(":{}", display));
        }

        debug!(command = %spec, "Running command");

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ToolError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ToolError::ExecutionFailed(format!("{}: {}", spec.program, e)))?;

        let result = CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            command = %spec,
            success = result.success,
            code = ?result.code,
            "Command finished"
        );
        Ok(result)
    }
}
