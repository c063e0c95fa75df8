//! Project frontmatter into structured per-document metadata.

use serde::Serialize;

use super::frontmatter::{self, Frontmatter};
use super::store::DocumentStore;
use crate::error::ApiError;

/// Structured metadata for one document. Optional fields are omitted from
/// JSON when the frontmatter does not carry them; a document without
/// frontmatter yields only its path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocMeta {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tldr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

impl DocMeta {
    /// Build the metadata record for one parsed document.
    pub fn from_frontmatter(path: String, fm: Option<&Frontmatter>) -> Self {
        let mut meta = DocMeta {
            path,
            ..Default::default()
        };
        let Some(fm) = fm else { return meta };

        meta.tldr = fm.scalar("tldr").map(str::to_string);
        meta.topics = fm.list("topics").map(<[String]>::to_vec);
        meta.doc_type = fm.scalar("type").map(str::to_string);
        meta.context_cost = fm.scalar("context_cost").map(str::to_string);
        meta.last_updated = fm.scalar("last_updated").map(str::to_string);
        meta.updated_by = fm.scalar("updated_by").map(str::to_string);
        meta.status = fm.scalar("status").map(str::to_string);
        meta.requires = fm.list("requires").map(<[String]>::to_vec);
        meta.unlocks = fm.list("unlocks").map(<[String]>::to_vec);
        meta.change = fm.scalar("change").map(str::to_string);
        meta
    }
}

/// Scan the corpus and project every markdown document's metadata.
pub fn collect(store: &DocumentStore) -> Result<Vec<DocMeta>, ApiError> {
    let mut records = Vec::new();
    for doc in store.markdown_docs()? {
        let (fm, _body) = frontmatter::parse(&doc.content);
        records.push(DocMeta::from_frontmatter(doc.path, fm.as_ref()));
    }
    Ok(records)
}
