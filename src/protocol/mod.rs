//! JSON-RPC 2.0 envelopes and the MCP wire types carried inside them.

pub mod envelope;
pub mod mcp;

pub use envelope::{EnvelopeError, RpcErrorObject, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use mcp::{methods, InitializeResult, ServerInfo};
