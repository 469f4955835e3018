use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Transport-level failures. These never travel inside a JSON-RPC envelope.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("Request timed out")]
    Timeout,

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => {
                tracing::warn!("Rejected request with missing or invalid bearer token");
                metrics::counter!("mcp_unauthorized_total").increment(1);
                // Exact body shape expected by MCP clients.
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "unauthorized" })),
                )
                    .into_response();
            }
            AppError::Timeout => {
                tracing::warn!("Request exceeded timeout");
                (StatusCode::REQUEST_TIMEOUT, self.to_string())
            }
            AppError::Corpus(msg) => {
                tracing::error!(error = %msg, "Corpus error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// JSON-RPC 2.0 protocol faults, carried at HTTP 200 inside an error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("Parse error")]
    ParseError,

    #[error("Invalid Request")]
    InvalidRequest,

    #[error("{0}")]
    MethodNotFound(String),

    #[error("{0}")]
    InvalidParams(String),

    #[error("{0}")]
    Internal(String),
}

impl RpcError {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    pub fn code(&self) -> i64 {
        match self {
            RpcError::ParseError => Self::PARSE_ERROR,
            RpcError::InvalidRequest => Self::INVALID_REQUEST,
            RpcError::MethodNotFound(_) => Self::METHOD_NOT_FOUND,
            RpcError::InvalidParams(_) => Self::INVALID_PARAMS,
            RpcError::Internal(_) => Self::INTERNAL_ERROR,
        }
    }
}

pub type RpcResult<T> = std::result::Result<T, RpcError>;

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::Internal(err.to_string())
    }
}
