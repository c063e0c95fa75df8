//! DocumentStore — flat-file storage for the blueprint corpus.
//!
//! Every operation re-reads the filesystem; the directory tree is the
//! single source of truth and there is no cache to invalidate.

use std::fs;
use std::path::{Path, PathBuf};

use super::file_ops::{self, FileEntry};
use crate::error::ApiError;

/// Result of reading a corpus path.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Raw text of a document file
    Text(String),
    /// Parsed content of a `.json` file
    Json(serde_json::Value),
    /// Immediate children of a directory (one level)
    Directory(Vec<FileEntry>),
}

/// Whether a write created a new file or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Created,
    Updated,
}

impl WriteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteAction::Created => "created",
            WriteAction::Updated => "updated",
        }
    }
}

/// A markdown document pulled out of a corpus scan.
#[derive(Debug, Clone)]
pub struct MarkdownDoc {
    /// `/`-separated path relative to the corpus root
    pub path: String,
    pub content: String,
}

pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: PathBuf) -> Self {
        fs::create_dir_all(&root).ok();
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursive pre-order listing of the whole corpus.
    pub fn list(&self) -> Result<Vec<FileEntry>, ApiError> {
        Ok(file_ops::list_entries(&self.root)?)
    }

    /// Read a file or directory by relative path.
    ///
    /// Directories return their immediate children; `.json` files are
    /// parsed (degrading to raw text when malformed); everything else is
    /// returned as text.
    pub fn read(&self, rel: &str) -> Result<ReadOutcome, ApiError> {
        let joined = file_ops::resolve_confined(&self.root, rel)?;
        let path = file_ops::verify_within_root(&self.root, &joined)?;

        if path.is_dir() {
            return Ok(ReadOutcome::Directory(file_ops::list_children(
                &self.root, &path,
            )?));
        }

        let content = fs::read_to_string(&path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            match serde_json::from_str(&content) {
                Ok(value) => return Ok(ReadOutcome::Json(value)),
                Err(e) => {
                    log::warn!("[DOCS] {} is not valid JSON ({}), serving as text", rel, e);
                }
            }
        }
        Ok(ReadOutcome::Text(content))
    }

    /// Create or update a file, creating intermediate directories as
    /// needed. Empty content is rejected.
    pub fn write(&self, rel: &str, content: &str) -> Result<WriteAction, ApiError> {
        if content.is_empty() {
            return Err(ApiError::InvalidInput("content is required".to_string()));
        }
        let path = file_ops::resolve_confined(&self.root, rel)?;
        let action = if path.exists() {
            WriteAction::Updated
        } else {
            WriteAction::Created
        };
        file_ops::write_file(&path, content)?;
        log::info!("[DOCS] {} {}", action.as_str(), rel);
        Ok(action)
    }

    /// Read every markdown document in the corpus, in stable discovery
    /// order. The scan underlying metadata, search, topics, and changes.
    pub fn markdown_docs(&self) -> Result<Vec<MarkdownDoc>, ApiError> {
        let mut docs = Vec::new();
        for path in file_ops::list_markdown(&self.root)? {
            let Some(rel) = file_ops::relative_path(&self.root, &path) else {
                continue;
            };
            let content = fs::read_to_string(&path)?;
            docs.push(MarkdownDoc { path: rel, content });
        }
        Ok(docs)
    }
}
