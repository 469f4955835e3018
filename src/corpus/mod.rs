//! Static, in-memory document corpus served by the `search` and `fetch` tools.
//!
//! The corpus is built once at startup (either the built-in demo records or a
//! JSON file named by `CORPUS_PATH`) and shared read-only between requests.

pub mod loader;
pub mod types;

pub use loader::MAX_DOCUMENTS;
pub use types::Document;

/// Read-only document set. Preserves insertion order, which is the tie-break
/// order for search results.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// The built-in ACME demo corpus.
    pub fn builtin() -> Self {
        Self {
            documents: vec![
                Document::new(
                    "doc-42",
                    "ACME Ops Playbook – Jellyfish Failover (v3.2)",
                    "https://intranet.acme.local/runbooks/jellyfish-failover",
                    "Jellyfish Failover – exact sequence:\n\
                     1) Freeze new workload intake\n\
                     2) Drain tasks from queue 'reef'\n\
                     3) Promote standby 'polyp-2' to primary\n\
                     4) Run post-switch check 'reef:health'\n\
                     5) Notify on-call via #ops-jellyfish\n\
                     Passphrase for controller unlock: purple-anvil\n",
                ),
                Document::new(
                    "doc-77",
                    "ACME Codename Glossary",
                    "https://intranet.acme.local/glossary/codenames",
                    "Project HAWK → 'Share Insights' analytics; owner: Data Platform.\n\
                     Project QUILL → Doc AI summarizer; owner: App Eng.\n",
                ),
                Document::new(
                    "doc-99",
                    "ACME Blackout Dates 2025 (internal)",
                    "https://intranet.acme.local/policies/blackouts-2025",
                    "Change freeze windows: 2025-11-24..2025-12-02 and 2025-12-20..2026-01-05.\n",
                ),
            ],
        }
    }

    /// Exact-match lookup by document id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_are_unique() {
        let corpus = Corpus::builtin();
        let ids: HashSet<&str> = corpus.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), corpus.len());
        assert!(corpus.len() <= MAX_DOCUMENTS);
    }

    #[test]
    fn test_get_exact_match_only() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.get("doc-42").map(|d| d.id.as_str()), Some("doc-42"));
        assert!(corpus.get("DOC-42").is_none());
        assert!(corpus.get("doc-4").is_none());
    }

    #[test]
    fn test_haystack_is_lowercase_and_includes_url() {
        let doc = Document::new("a", "Title", "https://Example.test/Path", "Body");
        let haystack = doc.haystack();
        assert!(haystack.contains("title"));
        assert!(haystack.contains("body"));
        assert!(haystack.contains("https://example.test/path"));
    }
}
