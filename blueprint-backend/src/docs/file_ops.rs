//! Filesystem primitives for the document corpus.
//!
//! Handles the recursive corpus walk, reading/writing document files, and
//! confining every resolved path to the corpus root.

use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ApiError;

/// One entry in a corpus listing.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// Resolve a `/`-separated relative path against the corpus root,
/// rejecting anything that could escape it. Absolute paths, backslashes,
/// and `..` components are refused before touching the filesystem.
pub fn resolve_confined(root: &Path, rel: &str) -> Result<PathBuf, ApiError> {
    if rel.contains('\\') {
        return Err(ApiError::InvalidInput("Invalid path".to_string()));
    }
    let candidate = Path::new(rel);
    let escapes = candidate.components().any(|c| {
        !matches!(c, Component::Normal(_) | Component::CurDir)
    });
    if escapes {
        return Err(ApiError::InvalidInput("Invalid path".to_string()));
    }
    Ok(root.join(rel))
}

/// Verify that an existing path really lives under the root once symlinks
/// are resolved. Callers use this after `resolve_confined` on read paths.
pub fn verify_within_root(root: &Path, path: &Path) -> Result<PathBuf, ApiError> {
    let canonical_root = root
        .canonicalize()
        .map_err(|_| ApiError::NotFound("File not found".to_string()))?;
    let canonical = path
        .canonicalize()
        .map_err(|_| ApiError::NotFound("File not found".to_string()))?;
    if !canonical.starts_with(&canonical_root) {
        return Err(ApiError::InvalidInput("Invalid path".to_string()));
    }
    Ok(canonical)
}

/// Recursive pre-order listing of the corpus. Each directory entry is
/// emitted immediately before its descendants; paths are `/`-joined
/// relative to the root. Hidden files and directories are skipped.
pub fn list_entries(root: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    if !root.exists() {
        return Ok(entries);
    }

    // The root itself is exempt from the hidden check; only entries
    // below it belong to the corpus.
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let rel = relative_path(root, entry.path());
        let Some(rel) = rel else { continue };
        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            path: rel,
            kind: if entry.file_type().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            },
        });
    }

    Ok(entries)
}

/// One-level listing of a directory, for directory reads.
pub fn list_children(root: &Path, dir: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for child in fs::read_dir(dir)? {
        let child = child?;
        let path = child.path();
        if is_hidden(&path) {
            continue;
        }
        let Some(rel) = relative_path(root, &path) else {
            continue;
        };
        entries.push(FileEntry {
            name: child.file_name().to_string_lossy().to_string(),
            path: rel,
            kind: if child.file_type()?.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            },
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// List all markdown files under the root (recursively), in the same
/// stable order as `list_entries`.
pub fn list_markdown(root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        if entry.file_type().is_file()
            && entry.path().extension().map(|e| e == "md").unwrap_or(false)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Write a document file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Get the `/`-separated path of a file relative to the root.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_entries_preorder() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("guides")).unwrap();
        fs::write(root.join("guides/auth.md"), "auth").unwrap();
        fs::write(root.join("index.md"), "index").unwrap();

        let entries = list_entries(root).unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();

        let dir_pos = paths.iter().position(|p| *p == "guides").unwrap();
        let child_pos = paths.iter().position(|p| *p == "guides/auth.md").unwrap();
        assert!(dir_pos < child_pos, "directory entry must precede its children");
        assert!(paths.contains(&"index.md"));
        assert_eq!(entries.iter().filter(|e| e.kind == EntryKind::Dir).count(), 1);
    }

    #[test]
    fn test_list_entries_skips_hidden() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".apps.json"), "{}").unwrap();
        fs::write(dir.path().join("visible.md"), "x").unwrap();

        let entries = list_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "visible.md");
    }

    #[test]
    fn test_resolve_confined_rejects_traversal() {
        let root = Path::new("/srv/data");
        assert!(resolve_confined(root, "../etc/passwd").is_err());
        assert!(resolve_confined(root, "a/../../etc/passwd").is_err());
        assert!(resolve_confined(root, "/etc/passwd").is_err());
        assert!(resolve_confined(root, "a\\..\\b").is_err());
        assert!(resolve_confined(root, "guides/auth.md").is_ok());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/c.md");
        write_file(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_list_markdown_recurses() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("one.md"), "1").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/two.md"), "2").unwrap();
        fs::write(root.join("sub/data.json"), "{}").unwrap();

        let files = list_markdown(root).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = Path::new("/srv/data");
        let rel = relative_path(root, Path::new("/srv/data/guides/auth.md")).unwrap();
        assert_eq!(rel, "guides/auth.md");
    }
}
