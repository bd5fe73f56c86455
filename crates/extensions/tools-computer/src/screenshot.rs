//! Display capture to a PNG file, returned base64-encoded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use deskpilot_protocols::error::ToolError;
use deskpilot_protocols::tool::ToolResult;

use crate::backend::CommandBackend;
use crate::runner::CommandRunner;

/// Captures the display through the backend's capture command.
pub struct ScreenshotService {
    runner: Arc<CommandRunner>,
    backend: Arc<dyn CommandBackend>,
    output_dir: PathBuf,
    /// Longest side after resizing, `None` to keep the captured size.
    resize_to: Option<u32>,
}

impl ScreenshotService {
    pub fn new(
        runner: Arc<CommandRunner>,
        backend: Arc<dyn CommandBackend>,
        output_dir: impl Into<PathBuf>,
        resize_to: Option<u32>,
    ) -> Self {
        Self {
            runner,
            backend,
            output_dir: output_dir.into(),
            resize_to,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Capture the display.
    ///
    /// The result carries the capture command's stdout and stderr alongside
    /// the image. Files are left in the output directory.
    pub async fn capture(&self) -> Result<ToolResult, ToolError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(screenshot_file_name());

        let capture = self
            .runner
            .run(&self.backend.capture_screen(&path))
            .await?;

        // Only a missing file is fatal; a written image survives a non-zero exit.
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ToolError::ScreenshotFailed(capture.stderr.trim().to_string()));
        }
        if !capture.success {
            warn!(
                path = %path.display(),
                stderr = %capture.stderr.trim(),
                "Screenshot command exited with an error but wrote the image"
            );
        }

        if let Some(max_side) = self.resize_to {
            self.resize(&path, max_side).await;
        }

        let bytes = tokio::fs::read(&path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Screenshot captured");

        Ok(ToolResult::new(capture.stdout, capture.stderr, Some(STANDARD.encode(bytes))))
    }

    // Best effort; an unresized image is still usable.
    async fn resize(&self, path: &Path, max_side: u32) {
        match self.runner.run(&self.backend.resize_image(path, max_side)).await {
            Ok(output) if output.success => {}
            Ok(output) => warn!(
                path = %path.display(),
                stderr = %output.stderr.trim(),
                "Screenshot resize failed, keeping original size"
            ),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Screenshot resize failed, keeping original size"
            ),
        }
    }
}

fn screenshot_file_name() -> String {
    format!(
        "screenshot_{}_{}.png",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CaptureBehavior, ScriptedBackend, FAKE_PNG_BASE64};
    use std::time::Duration;

    fn service(backend: ScriptedBackend, dir: &Path, resize_to: Option<u32>) -> ScreenshotService {
        let runner = Arc::new(CommandRunner::new(Duration::from_secs(5), None));
        ScreenshotService::new(runner, Arc::new(backend), dir, resize_to)
    }

    #[test]
    fn test_file_names_are_unique() {
        let a = screenshot_file_name();
        let b = screenshot_file_name();
        assert_ne!(a, b);
        assert!(a.starts_with("screenshot_"));
        assert!(a.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_capture_returns_base64_png() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(ScriptedBackend::new(), dir.path(), None)
            .capture()
            .await
            .unwrap();
        assert_eq!(result.base64_image.as_deref(), Some(FAKE_PNG_BASE64));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("outputs");
        let service = service(ScriptedBackend::new(), &nested, None);
        service.capture().await.unwrap();
        assert!(service.output_dir().is_dir());
    }

    #[tokio::test]
    async fn test_missing_file_is_screenshot_failure() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new().with_capture(CaptureBehavior::NoFile);
        let err = service(backend, dir.path(), None).capture().await.unwrap_err();
        assert!(matches!(err, ToolError::ScreenshotFailed(_)));
        assert!(err.to_string().starts_with("Failed to take screenshot"));
    }

    #[tokio::test]
    async fn test_failed_capture_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new().with_capture(CaptureBehavior::Fail);
        let err = service(backend, dir.path(), None).capture().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to take screenshot: could not create image from display"
        );
    }

    #[tokio::test]
    async fn test_resize_is_issued_with_max_side() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new();
        let log = backend.log();
        service(backend, dir.path(), Some(1366)).capture().await.unwrap();
        let issued = log.lock().clone();
        assert_eq!(issued.len(), 2);
        assert!(issued[0].starts_with("capture "));
        assert!(issued[1].starts_with("resize 1366 "));
    }

    #[tokio::test]
    async fn test_resize_failure_keeps_image() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new().with_failing_resize();
        let result = service(backend, dir.path(), Some(1366)).capture().await.unwrap();
        assert_eq!(result.base64_image.as_deref(), Some(FAKE_PNG_BASE64));
    }

    #[tokio::test]
    async fn test_written_image_survives_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new().with_capture(CaptureBehavior::WriteThenFail);
        let result = service(backend, dir.path(), None).capture().await.unwrap();
        assert_eq!(result.base64_image.as_deref(), Some(FAKE_PNG_BASE64));
        assert_eq!(result.error, "capture warning\n");
    }
}
