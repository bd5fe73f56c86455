//! Per-invocation tool context.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Everything a tool learns about the caller of one invocation.
#[derive(Clone)]
pub struct ToolContext {
    /// Caller identity, e.g. `cli` or `serve`.
    pub session_id: String,

    /// Unique per context; attached to log lines of the invocation.
    pub correlation_id: String,

    pub work_dir: PathBuf,

    /// Shared with the caller, who may abort a long-running invocation.
    pub abort_signal: Arc<AbortSignal>,
}

impl ToolContext {
    pub fn new(session_id: impl Into<String>, work_dir: PathBuf) -> Self {
        Self {
            session_id: session_id.into(),
            correlation_id: uuid::Uuid::new_v4().to_string(),
            work_dir,
            abort_signal: Arc::new(AbortSignal::new()),
        }
    }

    /// Use a caller-owned abort signal instead of a private one.
    pub fn with_abort_signal(mut self, abort_signal: Arc<AbortSignal>) -> Self {
        self.abort_signal = abort_signal;
        self
    }

    pub fn is_aborted(&self) -> bool {
        self.abort_signal.is_aborted()
    }
}

/// One-way cancellation flag. Tools poll it between steps.
#[derive(Debug, Default)]
pub struct AbortSignal {
    aborted: AtomicBool,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
