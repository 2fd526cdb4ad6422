//! Owner validation tool.
//!
//! Some tool-protocol clients call `validate` after connecting and expect
//! the server owner's phone number back.

use async_trait::async_trait;

use crate::error::ToolError;
use crate::mapping::ArgMapping;
use crate::schema::ToolSpec;
use crate::tool::{Tool, ToolArgs};

/// Returns the configured owner number verbatim.
pub struct Validate {
    owner_number: String,
    spec: ToolSpec,
}

impl Validate {
    pub fn new(owner_number: impl Into<String>) -> Self {
        Self {
            owner_number: owner_number.into(),
            spec: ToolSpec::new("validate", "Return the server owner's number for client validation."),
        }
    }
}

#[async_trait]
impl Tool for Validate {
    type Output = String;

    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn mappings(&self) -> &[ArgMapping] {
        &[]
    }

    async fn call(&self, _args: &ToolArgs) -> Result<String, ToolError> {
        Ok(self.owner_number.clone())
    }

    fn format(&self, _args: &ToolArgs, number: &String) -> Result<String, ToolError> {
        Ok(number.clone())
    }
}
