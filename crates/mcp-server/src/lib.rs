//! JSON-RPC tool server for the travel tools.
//!
//! Exposes a [`travel_tools::ToolRegistry`] to MCP clients over two
//! transports that share one [`Dispatcher`]:
//!
//! - [`http`] - `POST /mcp` with optional bearer auth and session ids.
//! - [`stdio`] - one message per line on stdin, responses on stdout.
//!
//! # Methods
//!
//! | Method | Result |
//! |--------|--------|
//! | `initialize` | Protocol version, capabilities, server info |
//! | `ping` | `{}` |
//! | `tools/list` | Registered tools with input schemas |
//! | `tools/call` | Tool output as text content |
//!
//! Messages without an `id` are notifications and get no response.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod protocol;
pub mod stdio;

pub use config::{load_env_files, Config, ConfigError};
pub use dispatch::Dispatcher;
pub use error::{ApiError, ServerError};

use std::sync::Arc;

use tracing::info;
use travel_providers::Providers;
use travel_tools::{default_registry, Adapter};

/// Name announced in `initialize`.
pub const SERVER_NAME: &str = "travel-mcp";

/// Register the configured tools against `providers` and wrap them in a
/// dispatcher.
pub fn build_dispatcher(config: &Config, providers: &Providers) -> error::Result<Dispatcher> {
    let registry = default_registry(providers, &config.tools_config())?;
    info!(
        toolset = %config.toolset,
        tools = registry.len(),
        "Tool registry ready"
    );

    let adapter = Adapter::with_options(Arc::new(registry), config.adapter_options());
    Ok(Dispatcher::new(adapter, SERVER_NAME))
}
