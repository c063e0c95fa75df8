//! Topic aggregation across the corpus.

use serde::Serialize;
use std::collections::BTreeSet;

use super::frontmatter;
use super::store::DocumentStore;
use crate::error::ApiError;

/// A document annotated with its topic list, for topic lookups.
#[derive(Debug, Clone, Serialize)]
pub struct TopicFile {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tldr: Option<String>,
    pub topics: Vec<String>,
}

/// The lower-cased, deduplicated, sorted set of every topic in the corpus.
pub fn all_topics(store: &DocumentStore) -> Result<Vec<String>, ApiError> {
    let mut topics = BTreeSet::new();
    for doc in store.markdown_docs()? {
        let (fm, _body) = frontmatter::parse(&doc.content);
        if let Some(list) = fm.as_ref().and_then(|f| f.list("topics")) {
            for topic in list {
                topics.insert(topic.to_lowercase());
            }
        }
    }
    Ok(topics.into_iter().collect())
}

/// Every document whose `topics` contains a case-insensitive match.
pub fn documents_for(store: &DocumentStore, topic: &str) -> Result<Vec<TopicFile>, ApiError> {
    let wanted = topic.to_lowercase();
    let mut files = Vec::new();
    for doc in store.markdown_docs()? {
        let (fm, _body) = frontmatter::parse(&doc.content);
        let Some(fm) = fm else { continue };
        let Some(topics) = fm.list("topics") else { continue };
        if topics.iter().any(|t| t.to_lowercase() == wanted) {
            files.push(TopicFile {
                path: doc.path,
                tldr: fm.scalar("tldr").map(str::to_string),
                topics: topics.to_vec(),
            });
        }
    }
    Ok(files)
}
