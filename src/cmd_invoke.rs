//! One-shot commands: invoke, options, tools.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tracing::{error, info};

use deskpilot_core::Kernel;
use deskpilot_tools_computer::{ComputerTool, DisplayOptions};

use crate::serve::response;

/// Build the request object for the `computer` tool from CLI arguments.
pub(crate) fn request_params(
    action: String,
    text: Option<String>,
    coordinate: Option<(u32, u32)>,
) -> Value {
    let mut params = json!({ "action": action });
    if let Some(text) = text {
        params["text"] = json!(text);
    }
    if let Some((x, y)) = coordinate {
        params["coordinate"] = json!([x, y]);
    }
    params
}

/// Perform one action and print the JSON response.
pub(crate) async fn handle_invoke(
    kernel: &Kernel,
    action: String,
    text: Option<String>,
    coordinate: Option<(u32, u32)>,
    save_image: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = request_params(action, text, coordinate);
    let ctx = kernel.tool_context("cli");
    let outcome = kernel.execute_tool(ComputerTool::ID, params, ctx).await;

    println!("{}", serde_json::to_string_pretty(&response(&outcome))?);

    match outcome {
        Ok(result) => {
            if let (Some(path), Some(image)) = (save_image, result.base64_image.as_deref()) {
                save_png(&path, image)?;
                info!("Screenshot saved to {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            error!("Action failed: {}", e);
            Err(e.into())
        }
    }
}

/// Decode a base64 screenshot and write it to `path`.
pub(crate) fn save_png(path: &Path, base64_image: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = STANDARD.decode(base64_image)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Display options as advertised in the tool definition.
pub(crate) fn display_options(kernel: &Kernel) -> Result<DisplayOptions, Box<dyn std::error::Error>> {
    let tool = kernel
        .tool_registry()
        .get(ComputerTool::ID)
        .ok_or("computer tool is not registered")?;
    let metadata = serde_json::to_value(&tool.definition().metadata)?;
    Ok(serde_json::from_value(metadata)?)
}

pub(crate) fn handle_options(kernel: &Kernel) -> Result<(), Box<dyn std::error::Error>> {
    let options = display_options(kernel)?;
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

pub(crate) fn handle_tools(kernel: &Kernel) -> Result<(), Box<dyn std::error::Error>> {
    let tools: Vec<Value> = kernel
        .tool_registry()
        .list()
        .iter()
        .map(|definition| definition.to_anthropic_tool())
        .collect();
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskpilot_tools_computer::ComputerToolsExtension;

    #[test]
    fn test_request_params() {
        let params = request_params("mouse_move".to_string(), None, Some((3, 4)));
        assert_eq!(params, json!({"action": "mouse_move", "coordinate": [3, 4]}));

        let params = request_params("type".to_string(), Some("hi".to_string()), None);
        assert_eq!(params, json!({"action": "type", "text": "hi"}));
    }

    #[test]
    fn test_save_png_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shots").join("out.png");
        save_png(&path, "ZmFrZXBuZw==").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"fakepng");
    }

    #[test]
    fn test_save_png_rejects_bad_base64() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_png(&dir.path().join("x.png"), "***").is_err());
    }

    #[tokio::test]
    async fn test_display_options_from_definition() {
        let kernel = Kernel::new(PathBuf::from("/tmp"));
        kernel
            .load_extension(
                Box::new(ComputerToolsExtension::new()),
                json!({"display": {"display_number": 1}}),
            )
            .await
            .unwrap();

        let options = display_options(&kernel).unwrap();
        assert_eq!(options.display_width_px, 1366);
        assert_eq!(options.display_height_px, 768);
        assert_eq!(options.display_number, Some(1));
    }
}
