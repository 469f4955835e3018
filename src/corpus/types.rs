//! Type definitions for the corpus module.

use serde::{Deserialize, Serialize};

/// A single record in the private document corpus.
///
/// Identity is `id`; records are never mutated once the corpus is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub url: String,
    pub content: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }

    /// Lower-cased text searched by the `search` tool: title, content and url.
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.title, self.content, self.url).to_lowercase()
    }
}
