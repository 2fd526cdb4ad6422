//! Method dispatch shared by the HTTP and stdio transports.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};
use travel_tools::{Adapter, ToolRequest, ToolResult};

use crate::protocol::{
    codes, error_code, CallToolParams, CallToolResult, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolDescriptor, DEFAULT_PROTOCOL_VERSION,
};

/// Answers JSON-RPC messages using a tool adapter.
#[derive(Clone)]
pub struct Dispatcher {
    adapter: Adapter,
    server_name: String,
}

impl Dispatcher {
    /// Create a dispatcher announcing itself under `server_name`.
    pub fn new(adapter: Adapter, server_name: impl Into<String>) -> Self {
        Self {
            adapter,
            server_name: server_name.into(),
        }
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Parse a raw message.
    ///
    /// Malformed JSON (including bytes that are not UTF-8) gives a parse
    /// error; valid JSON that is not a JSON-RPC 2.0 request gives an
    /// invalid-request error.
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<JsonRpcRequest, JsonRpcResponse> {
        let value: Value = serde_json::from_slice(raw.as_ref()).map_err(|e| {
            JsonRpcResponse::failure(None, codes::PARSE_ERROR, format!("Parse error: {}", e))
        })?;

        let id = value
            .get("id")
            .cloned()
            .and_then(|id| serde_json::from_value(id).ok());
        let request: JsonRpcRequest = serde_json::from_value(value).map_err(|e| {
            JsonRpcResponse::failure(
                id.clone(),
                codes::INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )
        })?;

        if request.jsonrpc != "2.0" {
            return Err(JsonRpcResponse::failure(
                id,
                codes::INVALID_REQUEST,
                "Invalid request: jsonrpc must be \"2.0\"",
            ));
        }

        Ok(request)
    }

    /// Handle one raw message. `None` means no response is due.
    pub async fn handle_raw(&self, raw: &str) -> Option<JsonRpcResponse> {
        match Self::parse(raw) {
            Ok(request) => self.handle(request).await,
            Err(response) => {
                warn!("Rejected message: {:?}", response.error);
                Some(response)
            }
        }
    }

    /// Handle one request. Notifications get `None`.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let JsonRpcRequest {
            id, method, params, ..
        } = request;

        let Some(id) = id else {
            debug!(method = %method, "notification");
            return None;
        };

        debug!(method = %method, id = ?id, "request");
        let outcome = match method.as_str() {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(params).await,
            other => Err((
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(Some(id), result),
            Err((code, message)) => JsonRpcResponse::failure(Some(id), code, message),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let params: InitializeParams = decode_or_default(params)?;
        let result = InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        to_value(&result)
    }

    fn list_tools(&self) -> Result<Value, (i32, String)> {
        let tools = self
            .adapter
            .registry()
            .list()
            .into_iter()
            .map(ToolDescriptor::from)
            .collect();
        to_value(&ListToolsResult { tools })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let Some(params) = params else {
            return Err((
                codes::INVALID_PARAMS,
                "Invalid params: tools/call requires a tool name".to_string(),
            ));
        };
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| (codes::INVALID_PARAMS, format!("Invalid params: {}", e)))?;

        let request = ToolRequest {
            name: params.name,
            arguments: params.arguments.unwrap_or_default(),
        };

        match self.adapter.invoke(request).await {
            ToolResult::Success { payload } => to_value(&CallToolResult::from(payload)),
            ToolResult::Failure { kind, message } => Err((error_code(kind), message)),
        }
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(params: Option<Value>) -> Result<T, (i32, String)> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| (codes::INVALID_PARAMS, format!("Invalid params: {}", e))),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, (i32, String)> {
    serde_json::to_value(value).map_err(|e| (codes::INTERNAL_ERROR, e.to_string()))
}
