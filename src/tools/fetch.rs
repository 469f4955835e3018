//! `fetch` tool: exact id lookup returning the full document.

use crate::corpus::Corpus;
use crate::error::RpcResult;
use crate::tools::{string_arg, ToolCallResult};
use serde::Serialize;
use serde_json::Value;

pub const NAME: &str = "fetch";

#[derive(Debug, Serialize)]
struct NotFound<'a> {
    error: &'static str,
    id: Option<&'a str>,
}

/// A miss is a tool-domain failure (`isError: true`), not a protocol error.
pub fn fetch(corpus: &Corpus, arguments: &Value) -> RpcResult<ToolCallResult> {
    let id = string_arg(arguments, "id");

    match id.as_deref().and_then(|id| corpus.get(id)) {
        Some(doc) => {
            tracing::info!(id = %doc.id, "Fetched document");
            ToolCallResult::success(doc)
        }
        None => {
            tracing::info!(id = ?id, "Document not found");
            ToolCallResult::failure(&NotFound {
                error: "not_found",
                id: id.as_deref(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(result: &ToolCallResult) -> Value {
        serde_json::from_str(&result.content[0].text).unwrap()
    }

    #[test]
    fn test_fetch_hit_returns_full_document() {
        let result = fetch(&Corpus::builtin(), &json!({"id": "doc-42"})).unwrap();
        assert!(!result.is_error);

        let doc = payload(&result);
        assert_eq!(doc["id"], "doc-42");
        assert!(doc["title"].as_str().unwrap().contains("Jellyfish"));
        assert!(doc["url"].as_str().unwrap().starts_with("https://"));
        assert!(doc["content"].as_str().unwrap().contains("polyp-2"));
    }

    #[test]
    fn test_fetch_miss_is_tool_error() {
        let result = fetch(&Corpus::builtin(), &json!({"id": "doc-404"})).unwrap();
        assert!(result.is_error);
        assert_eq!(payload(&result), json!({"error": "not_found", "id": "doc-404"}));
    }

    #[test]
    fn test_fetch_numeric_id_is_coerced() {
        let result = fetch(&Corpus::builtin(), &json!({"id": 42})).unwrap();
        assert!(result.is_error);
        assert_eq!(payload(&result)["id"], "42");
    }

    #[test]
    fn test_fetch_without_id_is_not_found() {
        let result = fetch(&Corpus::builtin(), &json!({})).unwrap();
        assert!(result.is_error);
        assert_eq!(payload(&result), json!({"error": "not_found", "id": null}));
    }
}
