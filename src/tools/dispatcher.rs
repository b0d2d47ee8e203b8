use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::args::{ToolCall, ToolRequest};
use super::catalog::Catalog;
use super::envelope::{ResultEnvelope, ToolOutput, ToolResponse};
use super::{handlers, schema};
use crate::error::ToolError;
use crate::log::{InvocationLog, TracingLog};
use crate::playback::{Sleeper, TokioSleeper};
use crate::providers::Desktop;

/// Routes a call by name to its handler and turns every outcome into a
/// [`ResultEnvelope`].
///
/// Per call: lookup, validation, execution, logging. Nothing is kept between
/// calls apart from the static catalog. Dispatch itself never fails.
pub struct Dispatcher {
    catalog: Catalog,
    desktop: Desktop,
    sleeper: Arc<dyn Sleeper>,
    log: Arc<dyn InvocationLog>,
    // Held for the whole handler run so overlapping calls cannot interleave
    // pointer or keyboard input.
    input_lock: Mutex<()>,
}

impl Dispatcher {
    pub fn new(desktop: Desktop) -> Self {
        Self {
            catalog: Catalog::new(),
            desktop,
            sleeper: Arc::new(TokioSleeper),
            log: Arc::new(TracingLog),
            input_lock: Mutex::new(()),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_log(mut self, log: Arc<dyn InvocationLog>) -> Self {
        self.log = log;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run one call and render the wire response.
    pub async fn call(&self, call: ToolCall) -> ToolResponse {
        self.dispatch(&call.name, &call.arguments)
            .await
            .into_response()
    }

    pub async fn dispatch(&self, name: &str, arguments: &Value) -> ResultEnvelope {
        self.log.on_invoke(name, arguments);

        match self.execute(name, arguments).await {
            Ok(output) => {
                self.log.on_success(name, &output);
                ResultEnvelope::Success(output)
            }
            Err(err) => {
                self.log.on_failure(name, &err);
                ResultEnvelope::failure(err.to_string())
            }
        }
    }

    async fn execute(&self, name: &str, arguments: &Value) -> Result<ToolOutput, ToolError> {
        let descriptor = self
            .catalog
            .lookup(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        // no provider is touched until the arguments are known to be good
        let validated = schema::validate(descriptor, arguments)?;
        let request = ToolRequest::parse(descriptor.kind, validated)?;

        let _input = self.input_lock.lock().await;
        debug!(tool = name, "executing");
        let run = handlers::handle(request, &self.desktop, self.sleeper.as_ref());
        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(ToolError::Panicked(panic_message(panic.as_ref()))),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
