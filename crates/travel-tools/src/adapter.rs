//! Invocation adapter.
//!
//! Every tool call goes through the same three steps:
//!
//! 1. **Validating** - resolve the tool and check the arguments against its
//!    spec. Nothing is sent to a collaborator if this fails.
//! 2. **Invoking** - translate the arguments and call the collaborator(s)
//!    exactly once, under the optional deadline.
//! 3. **Formatting** - render the result, or report that nothing matched.
//!
//! Whatever goes wrong comes back as a [`ToolResult::Failure`] carrying an
//! [`ErrorKind`] and a message starting with the tool's name. A failing
//! invocation leaves the registry and other in-flight calls untouched.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::error::{ErrorKind, ToolError};
use crate::registry::ToolRegistry;
use crate::tool::{OutputMode, Payload, ToolRequest, ToolResult};

/// Per-adapter invocation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Deadline for a single invocation. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// How successful results are rendered.
    pub output: OutputMode,
}

impl AdapterOptions {
    /// Set the invocation deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the output mode.
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}

/// Runs tool requests against a shared registry.
///
/// Holds no per-request state, so one adapter can serve any number of
/// concurrent invocations.
#[derive(Clone)]
pub struct Adapter {
    registry: Arc<ToolRegistry>,
    options: AdapterOptions,
}

impl Adapter {
    /// Create an adapter with default options.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self::with_options(registry, AdapterOptions::default())
    }

    /// Create an adapter with explicit options.
    pub fn with_options(registry: Arc<ToolRegistry>, options: AdapterOptions) -> Self {
        Self { registry, options }
    }

    /// The registry this adapter dispatches to.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn options(&self) -> AdapterOptions {
        self.options
    }

    /// Invoke one tool.
    pub async fn invoke(&self, request: ToolRequest) -> ToolResult {
        let ToolRequest { name, arguments } = request;
        let start = Instant::now();

        let tool = match self.registry.lookup(&name) {
            Ok(tool) => tool,
            Err(e) => {
                warn!("Rejected call: {}", e);
                return ToolResult::failure(e.kind(), e.to_string());
            }
        };

        debug!(tool = %name, "validating");
        let args = match tool.describe().validate(arguments) {
            Ok(args) => args,
            Err(e) => return fail(&name, e),
        };

        debug!(tool = %name, "invoking");
        let run = AssertUnwindSafe(tool.run(args, self.options.output)).catch_unwind();
        let outcome = match self.options.timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(outcome) => outcome,
                Err(_) => return fail(&name, ToolError::Timeout(limit)),
            },
            None => run.await,
        };

        match outcome {
            Ok(Ok(payload)) => {
                let empty = matches!(payload, Payload::NoResults(_));
                info!(
                    "Tool {} completed in {}ms{}",
                    name,
                    start.elapsed().as_millis(),
                    if empty { " (no results)" } else { "" }
                );
                ToolResult::Success { payload }
            }
            Ok(Err(e)) => fail(&name, e),
            Err(panic) => {
                let message = format!("{}: tool panicked: {}", name, panic_message(&*panic));
                warn!("{}", message);
                ToolResult::failure(ErrorKind::InternalError, message)
            }
        }
    }
}

fn fail(tool: &str, error: ToolError) -> ToolResult {
    let kind = error.kind();
    let message = format!("{}: {}", tool, error);
    warn!(kind = ?kind, "{}", message);
    ToolResult::failure(kind, message)
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
