//! The `computer` tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use deskpilot_protocols::error::ToolError;
use deskpilot_protocols::tool::{
    AbortSignal, Tool, ToolContext, ToolDefinition, ToolResult, ToolResultPatch,
};
use deskpilot_protocols::types::RiskLevel;

use crate::action::{Action, ActionRequest, ValidatedAction};
use crate::backend::CommandBackend;
use crate::chunk::{chunk_text, TYPING_CHUNK_SIZE};
use crate::config::DisplayConfig;
use crate::executor::ShellExecutor;
use crate::runner::CommandRunner;
use crate::scaling::{CoordinateScaler, ScaleDirection};
use crate::screenshot::ScreenshotService;

/// Built-in tool type advertised to the model.
const TOOL_TYPE: &str = "computer_20241022";

/// Display description advertised alongside the tool type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub display_width_px: u32,
    pub display_height_px: u32,
    pub display_number: Option<u32>,
}

/// Mouse, keyboard and screen control for a single display.
pub struct ComputerTool {
    definition: ToolDefinition,
    config: DisplayConfig,
    scaler: CoordinateScaler,
    backend: Arc<dyn CommandBackend>,
    executor: ShellExecutor,
}

impl ComputerTool {
    pub const ID: &'static str = "computer";

    /// Create a tool driving the backend named in `config`.
    pub fn new(config: DisplayConfig) -> Self {
        let backend = config.backend.create();
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: DisplayConfig, backend: Arc<dyn CommandBackend>) -> Self {
        let scaler = CoordinateScaler::new(config.width, config.height, config.scaling_enabled);
        let resize_to = config.scaling_enabled.then(|| {
            let (w, h) = scaler.scaled_display_size();
            w.max(h)
        });

        let runner = Arc::new(CommandRunner::new(
            config.command_timeout(),
            config.display_number,
        ));
        let screenshots = Arc::new(ScreenshotService::new(
            runner.clone(),
            backend.clone(),
            config.output_dir.clone(),
            resize_to,
        ));
        let executor = ShellExecutor::new(runner, screenshots, config.screenshot_delay());

        let options = display_options(&config, &scaler);
        let definition = build_definition(&options);

        debug!(
            backend = backend.name(),
            width = config.width,
            height = config.height,
            target = ?scaler.target().map(|t| t.name),
            "Computer tool created"
        );

        Self {
            definition,
            config,
            scaler,
            backend,
            executor,
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Display size in the caller's coordinate space.
    pub fn options(&self) -> DisplayOptions {
        display_options(&self.config, &self.scaler)
    }

    /// Validate and perform one action.
    pub async fn invoke(&self, request: &ActionRequest) -> Result<ToolResult, ToolError> {
        self.run(request, &AbortSignal::new()).await
    }

    async fn run(
        &self,
        request: &ActionRequest,
        abort: &AbortSignal,
    ) -> Result<ToolResult, ToolError> {
        let action = request.validate().inspect_err(|e| {
            warn!(action = %request.action, error = %e, "Rejected computer action");
        })?;
        debug!(action = %request.action, "Performing computer action");

        match action {
            ValidatedAction::MouseMove { x, y } => {
                let (x, y) = self.scaler.scale(ScaleDirection::Api, x, y)?;
                self.executor.execute(&self.backend.mouse_move(x, y), true).await
            }
            ValidatedAction::LeftClickDrag { x, y } => {
                let (x, y) = self.scaler.scale(ScaleDirection::Api, x, y)?;
                self.executor
                    .execute(&self.backend.left_click_drag(x, y), true)
                    .await
            }
            ValidatedAction::Key { chord } => {
                self.executor.execute(&self.backend.key(&chord), true).await
            }
            ValidatedAction::Type { text } => self.type_text(&text, abort).await,
            ValidatedAction::Click(kind) => {
                self.executor.execute(&self.backend.click(kind), true).await
            }
            ValidatedAction::Screenshot => self.executor.screenshots().capture().await,
            ValidatedAction::CursorPosition => self.cursor_position().await,
        }
    }

    async fn type_text(&self, text: &str, abort: &AbortSignal) -> Result<ToolResult, ToolError> {
        let mut output = String::new();
        let mut error = String::new();

        for chunk in chunk_text(text, TYPING_CHUNK_SIZE) {
            if abort.is_aborted() {
                return Err(ToolError::Cancelled);
            }
            let result = self
                .executor
                .execute(&self.backend.type_text(chunk), false)
                .await?;
            output.push_str(&result.output);
            error.push_str(&result.error);
        }

        let screenshot = self.executor.screenshots().capture().await?;
        Ok(ToolResult::new(output, error, screenshot.base64_image))
    }

    async fn cursor_position(&self) -> Result<ToolResult, ToolError> {
        let result = self
            .executor
            .execute(&self.backend.cursor_position(), true)
            .await?;
        let (x, y) = self
            .backend
            .parse_cursor_position(&result.output)
            .ok_or_else(|| {
                ToolError::ExecutionFailed(format!(
                    "could not parse cursor position from {:?}",
                    result.output.trim()
                ))
            })?;
        let (x, y) = self.scaler.to_computer(x, y);
        Ok(result.replace(ToolResultPatch::output(format!("X={},Y={}", x, y))))
    }
}

#[async_trait]
impl Tool for ComputerTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<ToolResult, ToolError> {
        let request = ActionRequest::from_value(params).inspect_err(|e| {
            warn!(error = %e, "Malformed computer request");
        })?;
        self.run(&request, &ctx.abort_signal).await
    }
}

fn display_options(config: &DisplayConfig, scaler: &CoordinateScaler) -> DisplayOptions {
    let (width, height) = scaler.scaled_display_size();
    DisplayOptions {
        display_width_px: width,
        display_height_px: height,
        display_number: config.display_number,
    }
}

fn build_definition(options: &DisplayOptions) -> ToolDefinition {
    let actions: Vec<&str> = Action::ALL.iter().map(Action::as_str).collect();
    let schema = serde_json::json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": actions,
                "description": "Action to perform"
            },
            "text": {
                "type": "string",
                "description": "Key chord for `key`, literal text for `type`"
            },
            "coordinate": {
                "type": "array",
                "items": { "type": "integer", "minimum": 0 },
                "minItems": 2,
                "maxItems": 2,
                "description": "(x, y) target for `mouse_move` and `left_click_drag`"
            }
        },
        "required": ["action"]
    });

    let mut definition = ToolDefinition::new(
        ComputerTool::ID,
        "Computer",
        "Control the mouse and keyboard and take screenshots of the display",
    )
    .with_parameters_schema(schema)
    .with_tool_type(TOOL_TYPE)
    .with_risk_level(RiskLevel::High)
    .with_metadata("display_width_px", options.display_width_px.into())
    .with_metadata("display_height_px", options.display_height_px.into());
    if let Some(display_number) = options.display_number {
        definition = definition.with_metadata("display_number", display_number.into());
    }
    definition
}

#[cfg(test)]
#[path = "computer_tests.rs"]
mod tests;
