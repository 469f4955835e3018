//! Tool catalog and invocation for `tools/list` and `tools/call`.
//!
//! Tool payloads are JSON-encoded into the `text` member of a single text
//! content block. Tool-domain failures (e.g. an unknown document id) are
//! reported with `isError: true` rather than as JSON-RPC errors.

pub mod fetch;
pub mod search;

use crate::corpus::Corpus;
use crate::error::{RpcError, RpcResult};
use serde::Serialize;
use serde_json::{json, Value};

pub use fetch::fetch;
pub use search::{search, SearchHit, SearchResults};

/// Discovery record published by `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result body of a `tools/call`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl ToolCallResult {
    pub fn success(payload: &impl Serialize) -> RpcResult<Self> {
        Self::with_payload(payload, false)
    }

    pub fn failure(payload: &impl Serialize) -> RpcResult<Self> {
        Self::with_payload(payload, true)
    }

    fn with_payload(payload: &impl Serialize, is_error: bool) -> RpcResult<Self> {
        Ok(Self {
            content: vec![ToolContent {
                kind: "text",
                text: serde_json::to_string(payload)?,
            }],
            is_error,
        })
    }
}

/// Every tool this server publishes, in advertised order.
pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: search::NAME,
            description: "Search private corpus. Returns id, title, and url for each match; use fetch for content.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "top_k": {
                        "type": "integer",
                        "minimum": search::MIN_TOP_K,
                        "maximum": search::MAX_TOP_K,
                        "default": search::DEFAULT_TOP_K
                    }
                },
                "required": ["query"],
                "additionalProperties": false
            }),
        },
        ToolDescriptor {
            name: fetch::NAME,
            description: "Fetch a document by id and return its content.",
            input_schema: json!({
                "type": "object",
                "properties": { "id": { "type": "string" } },
                "required": ["id"],
                "additionalProperties": false
            }),
        },
    ]
}

/// Invoke a tool by name with already-normalized arguments.
pub fn call_tool(corpus: &Corpus, name: &str, arguments: &Value) -> RpcResult<ToolCallResult> {
    match name {
        search::NAME => search(corpus, arguments),
        fetch::NAME => fetch(corpus, arguments),
        other => Err(RpcError::MethodNotFound(format!("Unknown tool: {}", other))),
    }
}

/// Read a scalar argument as a string, the way loosely-typed clients send it.
pub(crate) fn string_arg(arguments: &Value, key: &str) -> Option<String> {
    match arguments.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
