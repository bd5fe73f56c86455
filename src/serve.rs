//! JSON-lines relay between stdin/stdout and the `computer` tool.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use deskpilot_core::Kernel;
use deskpilot_protocols::error::{ErrorKind, ToolError};
use deskpilot_protocols::tool::{AbortSignal, ToolResult};
use deskpilot_tools_computer::ComputerTool;

/// Wire form of one invocation outcome.
pub(crate) fn response(outcome: &Result<ToolResult, ToolError>) -> Value {
    match outcome {
        Ok(result) => json!({
            "ok": true,
            "output": result.output,
            "error": result.error,
            "base64_image": result.base64_image,
        }),
        Err(e) => {
            let mut body = json!({
                "ok": false,
                "kind": e.kind(),
                "message": e.to_string(),
            });
            if let Some(partial) = e.partial_result() {
                body["output"] = json!(partial.output);
                body["error"] = json!(partial.error);
                body["base64_image"] = json!(partial.base64_image);
            }
            body
        }
    }
}

fn invalid_request(message: String) -> Value {
    json!({
        "ok": false,
        "kind": ErrorKind::Validation,
        "message": message,
    })
}

/// Answer one request line.
pub(crate) async fn handle_line(kernel: &Kernel, line: &str, abort: &Arc<AbortSignal>) -> Value {
    let params: Value = match serde_json::from_str(line) {
        Ok(params) => params,
        Err(e) => {
            warn!("Invalid request line: {}", e);
            return invalid_request(format!("Invalid JSON: {}", e));
        }
    };

    let ctx = kernel
        .tool_context("serve")
        .with_abort_signal(abort.clone());
    let outcome = kernel.execute_tool(ComputerTool::ID, params, ctx).await;
    if let Err(e) = &outcome {
        if e.is_validation() {
            warn!("Request rejected: {}", e);
        } else {
            error!("Request failed: {}", e);
        }
    }
    response(&outcome)
}

/// Relay until stdin closes or Ctrl+C.
///
/// Ctrl+C while idle stops at once. During a request it raises the abort
/// signal, so a `type` action stops before its next chunk, and the loop
/// ends after answering.
pub(crate) async fn run_serve(kernel: &Kernel) -> Result<(), Box<dyn std::error::Error>> {
    info!("Serving computer tool on stdin/stdout");
    let abort = Arc::new(AbortSignal::new());
    let watcher = {
        let abort = abort.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                abort.abort();
            }
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while !abort.is_aborted() {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let mut reply = serde_json::to_vec(&handle_line(kernel, &line, &abort).await)?;
        reply.push(b'\n');
        stdout.write_all(&reply).await?;
        stdout.flush().await?;
    }

    watcher.abort();
    info!("Serve loop finished");
    Ok(())
}
