//! Weighted full-text search over the markdown corpus.
//!
//! Each document is scored by summing fixed weights for query hits in the
//! filename, tldr, topics, and body; the snippet is cut from the first
//! occurrence of the query in the raw document text.

use serde::Serialize;

use super::frontmatter;
use super::store::DocumentStore;
use crate::error::ApiError;

const WEIGHT_FILENAME: u32 = 10;
const WEIGHT_TLDR: u32 = 8;
const WEIGHT_TOPIC: u32 = 5;
const WEIGHT_BODY: u32 = 3;

const SNIPPET_BEFORE: usize = 50;
const SNIPPET_AFTER: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub path: String,
    pub snippet: String,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tldr: Option<String>,
}

/// Score every markdown document against the query and return matches
/// sorted by descending score (stable, so ties keep discovery order).
pub fn search(store: &DocumentStore, query: &str) -> Result<Vec<SearchResult>, ApiError> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Err(ApiError::InvalidInput(
            "q parameter is required".to_string(),
        ));
    }

    let mut results = Vec::new();
    for doc in store.markdown_docs()? {
        let (fm, body) = frontmatter::parse(&doc.content);
        let tldr = fm.as_ref().and_then(|f| f.scalar("tldr")).map(str::to_string);

        let filename = doc.path.rsplit('/').next().unwrap_or(&doc.path);
        let mut score = 0;
        if filename.to_lowercase().contains(&q) {
            score += WEIGHT_FILENAME;
        }
        if tldr
            .as_deref()
            .map(|t| t.to_lowercase().contains(&q))
            .unwrap_or(false)
        {
            score += WEIGHT_TLDR;
        }
        if fm
            .as_ref()
            .and_then(|f| f.list("topics"))
            .map(|topics| topics.iter().any(|t| t.to_lowercase().contains(&q)))
            .unwrap_or(false)
        {
            score += WEIGHT_TOPIC;
        }
        if body.to_lowercase().contains(&q) {
            score += WEIGHT_BODY;
        }
        if score == 0 {
            continue;
        }

        // Snippet scan runs over the raw text, frontmatter included.
        // Filename/topic-only matches fall back to the tldr.
        let snippet = extract_snippet(&doc.content, &q)
            .unwrap_or_else(|| tldr.clone().unwrap_or_default());

        results.push(SearchResult {
            path: doc.path,
            snippet,
            score,
            tldr,
        });
    }

    results.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(results)
}

/// Cut a context window around the first case-insensitive occurrence of
/// the query: up to 50 chars before and 100 + query-length after, with
/// whitespace runs collapsed and `...` marking a truncated side.
fn extract_snippet(text: &str, query_lower: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let pos = lower.find(query_lower)?;

    let start = floor_char_boundary(text, pos.saturating_sub(SNIPPET_BEFORE).min(text.len()));
    let end = floor_char_boundary(
        text,
        (pos + query_lower.len() + SNIPPET_AFTER).min(text.len()),
    );

    let window: Vec<&str> = text[start..end].split_whitespace().collect();
    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&window.join(" "));
    if end < text.len() {
        snippet.push_str("...");
    }
    Some(snippet)
}

/// Largest char boundary at or below `index`. Lowercasing can shift byte
/// offsets for some characters, so window edges are re-anchored before
/// slicing the original text.
fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
