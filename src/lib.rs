//! mcp-static - Minimal Model Context Protocol server
//!
//! Serves `initialize`, `tools/list` and `tools/call` over JSON-RPC on HTTP,
//! exposing `search` and `fetch` tools backed by a small static corpus.
//! The library exposes the components for integration tests and embedding.

pub mod auth;
pub mod config;
pub mod corpus;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;
pub mod state;
pub mod tools;

// Re-export key types for convenience
pub use auth::AuthGate;
pub use config::{Config, LogFormat};
pub use corpus::{Corpus, Document};
pub use dispatch::{Dispatch, McpServer};
pub use error::{AppError, Result, RpcError, RpcResult};
pub use protocol::{RpcRequest, RpcResponse};
pub use router::build_router;
pub use server::serve_with_drain;
pub use state::AppState;
