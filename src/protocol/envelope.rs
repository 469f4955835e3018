//! Request envelope parsing and response envelope construction.

use crate::error::RpcError;
use serde::Serialize;
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// A validated inbound JSON-RPC request.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    /// `Value::Null` when the request carried no id.
    pub id: Value,
    pub method: String,
    /// `None` when `params` was absent or null.
    pub params: Option<Value>,
}

/// A rejected envelope, with whatever id could be recovered from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeError {
    pub id: Value,
    pub error: RpcError,
}

impl EnvelopeError {
    pub fn into_response(self) -> RpcResponse {
        RpcResponse::error(self.id, &self.error)
    }
}

impl RpcRequest {
    /// Parse raw body bytes into a validated request.
    ///
    /// Invalid JSON is a `ParseError` with a null id. Anything that is not an
    /// object with `jsonrpc: "2.0"` and a string `method` is an
    /// `InvalidRequest`, echoing the id if one was present.
    pub fn parse(body: &[u8]) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| EnvelopeError {
            id: Value::Null,
            error: RpcError::ParseError,
        })?;

        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let Value::Object(mut object) = value else {
            return Err(EnvelopeError {
                id: Value::Null,
                error: RpcError::InvalidRequest,
            });
        };

        let id = match object.remove("id") {
            Some(id @ (Value::String(_) | Value::Number(_))) => id,
            _ => Value::Null,
        };

        let invalid = |id: Value| EnvelopeError {
            id,
            error: RpcError::InvalidRequest,
        };

        if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(invalid(id));
        }

        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            _ => return Err(invalid(id)),
        };

        let params = match object.remove("params") {
            None | Some(Value::Null) => None,
            Some(params) => Some(params),
        };

        Ok(Self { id, method, params })
    }

    pub fn is_notification(&self) -> bool {
        self.method.starts_with(crate::protocol::methods::NOTIFICATION_PREFIX)
    }
}

/// Outbound JSON-RPC envelope. Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: &RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcErrorObject {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }
}
