//! Method dispatch for validated JSON-RPC requests.
//!
//! Methods are looked up in an explicit name -> handler table. The
//! `notifications/` namespace is matched by prefix and never produces a body.
//! Handlers share no mutable state, so one dispatcher serves every request.

use crate::corpus::Corpus;
use crate::error::{RpcError, RpcResult};
use crate::protocol::{methods, InitializeResult, RpcRequest, RpcResponse};
use crate::tools::{self, ToolDescriptor};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub type MethodHandler = fn(&McpServer, Option<Value>) -> RpcResult<Value>;

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum Dispatch {
    /// A JSON-RPC envelope to return with HTTP 200.
    Reply(RpcResponse),
    /// Notification: acknowledge with an empty body.
    Acknowledged,
}

pub struct McpServer {
    corpus: Arc<Corpus>,
    tools: Vec<ToolDescriptor>,
    handlers: HashMap<&'static str, MethodHandler>,
}

impl McpServer {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        let mut handlers: HashMap<&'static str, MethodHandler> = HashMap::new();
        handlers.insert(methods::INITIALIZE, handle_initialize);
        handlers.insert(methods::LIST_TOOLS, handle_list_tools);
        handlers.insert(methods::CALL_TOOL, handle_call_tool);

        Self {
            corpus,
            tools: tools::catalog(),
            handlers,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Registered request methods, sorted. Notifications are not listed.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn dispatch(&self, request: RpcRequest) -> Dispatch {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification acknowledged");
            metrics::counter!("mcp_requests_total", "method" => "notification").increment(1);
            return Dispatch::Acknowledged;
        }

        let RpcRequest { id, method, params } = request;

        let outcome = match self.handlers.get_key_value(method.as_str()) {
            Some((name, handler)) => {
                tracing::debug!(method = %name, id = %id, "Dispatching request");
                metrics::counter!("mcp_requests_total", "method" => *name).increment(1);
                handler(self, params)
            }
            None => {
                metrics::counter!("mcp_requests_total", "method" => "unknown").increment(1);
                Err(RpcError::MethodNotFound(format!("Unknown method: {}", method)))
            }
        };

        let response = match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(err) => {
                tracing::debug!(method = %method, code = err.code(), error = %err, "Request failed");
                metrics::counter!("mcp_errors_total", "code" => err.code().to_string())
                    .increment(1);
                RpcResponse::error(id, &err)
            }
        };

        Dispatch::Reply(response)
    }
}

fn handle_initialize(_server: &McpServer, _params: Option<Value>) -> RpcResult<Value> {
    Ok(serde_json::to_value(InitializeResult::default())?)
}

/// No pagination: the cursor is accepted and ignored.
fn handle_list_tools(server: &McpServer, _params: Option<Value>) -> RpcResult<Value> {
    Ok(json!({
        "tools": server.tools(),
        "nextCursor": Value::Null,
    }))
}

fn handle_call_tool(server: &McpServer, params: Option<Value>) -> RpcResult<Value> {
    let mut params = params.unwrap_or_else(|| json!({}));

    // Scalar names are taken in string form; a missing name can never resolve.
    let name = tools::string_arg(&params, "name").unwrap_or_else(|| "undefined".to_string());
    if !server.tools().iter().any(|tool| tool.name == name) {
        return Err(RpcError::MethodNotFound(format!("Unknown tool: {}", name)));
    }

    let arguments = normalize_arguments(params.get_mut("arguments").map(Value::take))?;

    let result = tools::call_tool(server.corpus(), &name, &arguments)?;

    metrics::counter!(
        "mcp_tool_calls_total",
        "tool" => name,
        "is_error" => result.is_error.to_string()
    )
    .increment(1);

    Ok(serde_json::to_value(result)?)
}

/// `arguments` may be an object or a JSON-encoded string of one.
/// Absent, null and blank-string arguments become `{}`.
pub fn normalize_arguments(arguments: Option<Value>) -> RpcResult<Value> {
    match arguments {
        None | Some(Value::Null) => Ok(json!({})),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(json!({})),
        Some(Value::String(raw)) => serde_json::from_str(&raw).map_err(|e| {
            RpcError::InvalidParams(format!("Invalid arguments JSON: {}", e))
        }),
        Some(other) => Ok(other),
    }
}
