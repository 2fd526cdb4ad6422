//! Tool trait definition and types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ErrorKind, ToolError};
use crate::mapping::ArgMapping;
use crate::schema::ToolSpec;

/// Validated arguments passed to a tool.
///
/// Produced by [`ToolSpec::validate`]: aliases are folded onto canonical
/// names, defaults are filled in and types already checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    params: Map<String, Value>,
}

impl ToolArgs {
    /// Wrap an already-normalized parameter map.
    pub fn new(params: Map<String, Value>) -> Self {
        Self { params }
    }

    /// Raw access to a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// All parameters.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::invalid(key, "expected string"))
    }

    /// Get an optional string parameter.
    pub fn get_string_opt(&self, key: &str) -> Option<String> {
        self.params.get(key)?.as_str().map(|s| s.to_string())
    }

    /// Get an optional integer parameter.
    pub fn get_i64_opt(&self, key: &str) -> Result<Option<i64>, ToolError> {
        match self.params.get(key) {
            Some(v) => v
                .as_i64()
                .map(Some)
                .ok_or_else(|| ToolError::invalid(key, "expected integer")),
            None => Ok(None),
        }
    }

    /// Get an optional f64 parameter.
    pub fn get_f64_opt(&self, key: &str) -> Result<Option<f64>, ToolError> {
        match self.params.get(key) {
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| ToolError::invalid(key, "expected number")),
            None => Ok(None),
        }
    }

    /// Get an optional boolean parameter.
    pub fn get_bool_opt(&self, key: &str) -> Result<Option<bool>, ToolError> {
        match self.params.get(key) {
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| ToolError::invalid(key, "expected boolean")),
            None => Ok(None),
        }
    }

    /// Get a string-list parameter. Missing means empty.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.params.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

/// A request to invoke one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    /// Registered tool name.
    pub name: String,
    /// Raw, unvalidated arguments.
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    /// Create a request with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Map::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }
}

/// Successful tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Pre-rendered descriptive text.
    Text(String),
    /// The collaborator's data as JSON.
    Structured(Value),
    /// The lookup succeeded but matched nothing.
    NoResults(String),
}

impl Payload {
    /// Text rendering of the payload.
    pub fn to_text(&self) -> String {
        match self {
            Payload::Text(text) | Payload::NoResults(text) => text.clone(),
            Payload::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success { payload: Payload },
    Failure { kind: ErrorKind, message: String },
}

impl ToolResult {
    /// Build a failure from a tool error.
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        ToolResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }
}

/// How successful results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text from the tool's formatter.
    #[default]
    Text,
    /// The collaborator's data serialized as JSON.
    Json,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            other => Err(format!("unknown output mode '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Text => f.write_str("text"),
            OutputMode::Json => f.write_str("json"),
        }
    }
}

/// Trait for tools exposed over the tool protocol.
///
/// A tool declares its parameters and how they translate to collaborator
/// arguments. `call` performs the lookup, `format` renders the result.
/// Validation and error normalization are handled by the adapter, so
/// implementations only see well-formed [`ToolArgs`].
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    /// Collaborator data returned by `call`.
    type Output: Serialize + Send + Sync;

    /// Name, description and parameters.
    fn spec(&self) -> &ToolSpec;

    /// Argument translations to each collaborator this tool calls.
    fn mappings(&self) -> &[ArgMapping];

    /// Perform the lookup.
    async fn call(&self, args: &ToolArgs) -> Result<Self::Output, ToolError>;

    /// Render the result as text.
    fn format(&self, args: &ToolArgs, output: &Self::Output) -> Result<String, ToolError>;

    /// Whether the result matched nothing.
    fn is_empty(&self, _output: &Self::Output) -> bool {
        false
    }

    /// Message returned when the result is empty.
    fn no_results(&self, _args: &ToolArgs) -> String {
        "No results found.".to_string()
    }
}

/// Object-safe view of a [`Tool`], as stored in the registry.
#[async_trait]
pub trait RegisteredTool: Send + Sync {
    /// Name, description and parameters.
    fn describe(&self) -> &ToolSpec;

    /// Argument translations to each collaborator.
    fn translations(&self) -> &[ArgMapping];

    /// Call the tool and render the result in the given mode.
    async fn run(&self, args: ToolArgs, mode: OutputMode) -> Result<Payload, ToolError>;
}

#[async_trait]
impl<T: Tool> RegisteredTool for T {
    fn describe(&self) -> &ToolSpec {
        self.spec()
    }

    fn translations(&self) -> &[ArgMapping] {
        self.mappings()
    }

    async fn run(&self, args: ToolArgs, mode: OutputMode) -> Result<Payload, ToolError> {
        let output = self.call(&args).await?;

        let name = &self.spec().name;
        debug!(tool = %name, mode = %mode, "formatting");

        if self.is_empty(&output) {
            return Ok(Payload::NoResults(self.no_results(&args)));
        }

        match mode {
            OutputMode::Json => Ok(Payload::Structured(serde_json::to_value(&output)?)),
            OutputMode::Text => Ok(Payload::Text(self.format(&args, &output)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_list_getter() {
        let mut params = Map::new();
        params.insert("cuisine".to_string(), json!(["thai", "indian"]));
        params.insert("single".to_string(), json!("vegan"));
        let args = ToolArgs::new(params);

        assert_eq!(args.get_string_list("cuisine"), vec!["thai", "indian"]);
        assert_eq!(args.get_string_list("single"), vec!["vegan"]);
        assert!(args.get_string_list("missing").is_empty());
    }

    #[test]
    fn test_typed_getters() {
        let mut params = Map::new();
        params.insert("days".to_string(), json!(3));
        params.insert("location".to_string(), json!("Oslo"));
        let args = ToolArgs::new(params);

        assert_eq!(args.get_i64_opt("days").unwrap(), Some(3));
        assert_eq!(args.get_i64_opt("limit").unwrap(), None);
        assert!(args.get_i64_opt("location").is_err());
        assert!(matches!(
            args.get_string("origin"),
            Err(ToolError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_output_mode_parse() {
        assert_eq!("json".parse::<OutputMode>().unwrap(), OutputMode::Json);
        assert_eq!(" Text ".parse::<OutputMode>().unwrap(), OutputMode::Text);
        assert!("yaml".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_structured_payload_text() {
        let payload = Payload::Structured(json!({"a": 1}));
        assert!(payload.to_text().contains("\"a\": 1"));
        assert_eq!(Payload::NoResults("none".into()).to_text(), "none");
    }
}
