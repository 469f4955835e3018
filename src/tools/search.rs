//! `search` tool: term-overlap matching over the corpus.
//!
//! Each query token scores one point when it occurs as a substring of a
//! document's lower-cased title, content and url. Hits are ordered by score,
//! ties keep corpus order. Content is withheld from hits; callers `fetch` it.

use crate::corpus::Corpus;
use crate::error::{RpcError, RpcResult};
use crate::tools::{string_arg, ToolCallResult};
use serde::Serialize;
use serde_json::Value;

pub const NAME: &str = "search";

pub const DEFAULT_TOP_K: usize = 5;
pub const MIN_TOP_K: usize = 1;
pub const MAX_TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub results: Vec<SearchHit>,
    pub total: usize,
}

pub fn search(corpus: &Corpus, arguments: &Value) -> RpcResult<ToolCallResult> {
    let start_time = std::time::Instant::now();

    let query = string_arg(arguments, "query").unwrap_or_default();
    if query.trim().is_empty() {
        return Err(RpcError::InvalidParams("Missing query".to_string()));
    }
    let top_k = top_k_arg(arguments);

    let results = rank(corpus, &query, top_k);
    let total = results.len();

    tracing::info!(
        query = %query,
        top_k,
        total,
        elapsed_us = start_time.elapsed().as_micros() as u64,
        "Search completed"
    );

    ToolCallResult::success(&SearchResults { results, total })
}

/// Score, filter, order and truncate the corpus for `query`.
pub fn rank(corpus: &Corpus, query: &str, top_k: usize) -> Vec<SearchHit> {
    let query = query.to_lowercase();
    let tokens: Vec<&str> = query.split_whitespace().collect();

    let mut scored: Vec<(usize, &crate::corpus::Document)> = corpus
        .documents()
        .iter()
        .filter_map(|doc| {
            let haystack = doc.haystack();
            let score = tokens.iter().filter(|t| haystack.contains(**t)).count();
            (score > 0).then_some((score, doc))
        })
        .collect();

    // sort_by is stable: equal scores keep corpus order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(top_k)
        .map(|(_, doc)| SearchHit {
            id: doc.id.clone(),
            title: doc.title.clone(),
            url: doc.url.clone(),
        })
        .collect()
}

/// `top_k` defaults to 5 and is clamped to [1, 10]. Non-numeric values fall
/// back to the default.
fn top_k_arg(arguments: &Value) -> usize {
    let requested = match arguments.get("top_k") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match requested {
        Some(k) => k.clamp(MIN_TOP_K as i64, MAX_TOP_K as i64) as usize,
        None => DEFAULT_TOP_K,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;
    use serde_json::json;

    fn payload(result: &ToolCallResult) -> Value {
        serde_json::from_str(&result.content[0].text).unwrap()
    }

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            Document::new("a", "Reef notes", "https://x/a", "nothing else"),
            Document::new("b", "Jellyfish reef", "https://x/b", "jellyfish everywhere"),
            Document::new("c", "Unrelated", "https://x/c", "plain text"),
            Document::new("d", "Another reef", "https://x/d", "more"),
        ])
        .unwrap()
    }

    #[test]
    fn test_search_jellyfish_builtin() {
        let result = search(&Corpus::builtin(), &json!({"query": "jellyfish"})).unwrap();
        assert!(!result.is_error);

        let body = payload(&result);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["id"], "doc-42");
        assert!(results[0].get("content").is_none());
        assert_eq!(body["total"], 1);
    }

    #[test]
    fn test_case_insensitive_match() {
        let hits = rank(&Corpus::builtin(), "JELLYFISH", 5);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_orders_by_score_then_corpus_order() {
        let hits = rank(&corpus(), "jellyfish reef", 10);
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "d"]);
    }

    #[test]
    fn test_url_is_searched() {
        let hits = rank(&Corpus::builtin(), "blackouts-2025", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "doc-99");
    }

    #[test]
    fn test_top_k_truncates() {
        let result = search(&corpus(), &json!({"query": "reef", "top_k": 1})).unwrap();
        let body = payload(&result);
        assert_eq!(body["results"].as_array().unwrap().len(), 1);
        assert_eq!(body["total"], 1);
    }

    #[test]
    fn test_top_k_clamped() {
        assert_eq!(top_k_arg(&json!({"top_k": 0})), 1);
        assert_eq!(top_k_arg(&json!({"top_k": -3})), 1);
        assert_eq!(top_k_arg(&json!({"top_k": 500})), 10);
        assert_eq!(top_k_arg(&json!({"top_k": 3})), 3);
        assert_eq!(top_k_arg(&json!({"top_k": "4"})), 4);
        assert_eq!(top_k_arg(&json!({"top_k": 2.9})), 2);
        assert_eq!(top_k_arg(&json!({})), DEFAULT_TOP_K);
        assert_eq!(top_k_arg(&json!({"top_k": "lots"})), DEFAULT_TOP_K);
    }

    #[test]
    fn test_empty_query_is_invalid_params() {
        for args in [json!({"query": ""}), json!({"query": "   "}), json!({}), json!({"query": null})] {
            let err = search(&Corpus::builtin(), &args).unwrap_err();
            assert_eq!(err, RpcError::InvalidParams("Missing query".into()));
        }
    }

    #[test]
    fn test_no_match_returns_empty_list() {
        let result = search(&Corpus::builtin(), &json!({"query": "zebra"})).unwrap();
        let body = payload(&result);
        assert_eq!(body["results"], json!([]));
        assert_eq!(body["total"], 0);
        assert!(!result.is_error);
    }
}
