use serde_json::Value;
use tracing::{error, info};

use crate::error::ToolError;
use crate::tools::ToolOutput;

/// Receives the lifecycle of every dispatched call: one `on_invoke` before the
/// handler runs, then exactly one of `on_success` / `on_failure`.
///
/// Implementations must not panic and should not block for long; the
/// dispatcher waits for them.
pub trait InvocationLog: Send + Sync {
    fn on_invoke(&self, tool: &str, arguments: &Value);

    fn on_success(&self, tool: &str, output: &ToolOutput);

    fn on_failure(&self, tool: &str, error: &ToolError);
}

/// Structured `tracing` events: `Tool invoked`, `Tool succeeded`, `Tool failed`.
pub struct TracingLog;

impl InvocationLog for TracingLog {
    fn on_invoke(&self, tool: &str, arguments: &Value) {
        info!(tool, args = %arguments, "Tool invoked");
    }

    fn on_success(&self, tool: &str, output: &ToolOutput) {
        let result = serde_json::to_string(output).unwrap_or_else(|_| output.text());
        info!(tool, result = %result, "Tool succeeded");
    }

    fn on_failure(&self, tool: &str, err: &ToolError) {
        error!(tool, error = %err, "Tool failed");
    }
}

/// Discards everything.
pub struct NoopLog;

impl InvocationLog for NoopLog {
    fn on_invoke(&self, _: &str, _: &Value) {}

    fn on_success(&self, _: &str, _: &ToolOutput) {}

    fn on_failure(&self, _: &str, _: &ToolError) {}
}
