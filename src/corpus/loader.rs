//! Loading a replacement corpus from a JSON file.

use crate::corpus::{Corpus, Document};
use crate::error::{AppError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Upper bound on corpus size. Search is a linear scan over every record.
pub const MAX_DOCUMENTS: usize = 10;

impl Corpus {
    /// Load a corpus from a JSON array of `{id, title, url, content}` records.
    ///
    /// # Errors
    /// Returns `AppError::Corpus` if the file cannot be read or parsed, is
    /// empty, holds more than [`MAX_DOCUMENTS`] records, or repeats an id.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Corpus(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let documents: Vec<Document> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Corpus(format!("Invalid corpus JSON in {}: {}", path.display(), e))
        })?;

        let corpus = Self::from_documents(documents)?;

        tracing::info!(
            path = %path.display(),
            documents = corpus.len(),
            "Loaded corpus from file"
        );

        Ok(corpus)
    }

    /// Build a corpus from records, validating size and id uniqueness.
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        if documents.is_empty() {
            return Err(AppError::Corpus("Corpus must contain at least one document".into()));
        }
        if documents.len() > MAX_DOCUMENTS {
            return Err(AppError::Corpus(format!(
                "Corpus holds {} documents, maximum is {}",
                documents.len(),
                MAX_DOCUMENTS
            )));
        }

        let mut seen = HashSet::with_capacity(documents.len());
        for doc in &documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(AppError::Corpus(format!("Duplicate document id: {}", doc.id)));
            }
        }

        Ok(Self { documents })
    }
}
