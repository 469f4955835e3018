pub mod health;
pub mod mcp;

pub use health::{fallback_handler, health_handler, ready_handler, version_handler};
pub use mcp::mcp_handler;
