//! Server liveness tool.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ToolError;
use crate::mapping::ArgMapping;
use crate::schema::ToolSpec;
use crate::tool::{Tool, ToolArgs};

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub tools: Vec<String>,
}

/// Reports that the server is up and which tools it serves.
pub struct HealthCheck {
    tools: Vec<String>,
    spec: ToolSpec,
}

impl HealthCheck {
    /// Create a health check listing the given tool names.
    ///
    /// The check itself is appended to the list.
    pub fn new(tools: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let spec = ToolSpec::new("health_check", "Check if the travel tool server is running properly.");
        let mut tools: Vec<String> = tools.into_iter().map(Into::into).collect();
        tools.push(spec.name.clone());
        Self { tools, spec }
    }
}

#[async_trait]
impl Tool for HealthCheck {
    type Output = HealthStatus;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        &[]
    }

    async fn call(&self, _args: &ToolArgs) -> Result<HealthStatus, ToolError> {
        Ok(HealthStatus {
            status: "ok",
            tools: self.tools.clone(),
        })
    }

    fn format(&self, _args: &ToolArgs, health: &HealthStatus) -> Result<String, ToolError> {
        Ok(format!(
            "Travel MCP server is running. Available tools: {}",
            health.tools.join(", ")
        ))
    }
}
