//! Change tracking: which documents were updated after a cutoff date.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use super::frontmatter;
use super::store::DocumentStore;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    pub path: String,
    pub last_updated: String,
    pub updated_by: String,
    pub change: String,
}

/// Every markdown document whose `last_updated` frontmatter date is
/// strictly later than the cutoff. Documents without a parseable
/// `last_updated` are silently excluded.
pub fn changes_since(store: &DocumentStore, since: &str) -> Result<Vec<ChangeRecord>, ApiError> {
    let cutoff = parse_date(since).ok_or_else(|| {
        ApiError::InvalidInput("since parameter required (YYYY-MM-DD)".to_string())
    })?;

    let mut changes = Vec::new();
    for doc in store.markdown_docs()? {
        let (fm, _body) = frontmatter::parse(&doc.content);
        let Some(fm) = fm else { continue };
        let Some(last_updated) = fm.scalar("last_updated") else {
            continue;
        };
        let Some(date) = parse_date(last_updated) else {
            continue;
        };
        if date > cutoff {
            changes.push(ChangeRecord {
                path: doc.path,
                last_updated: last_updated.to_string(),
                updated_by: fm
                    .scalar("updated_by")
                    .unwrap_or("unknown")
                    .to_string(),
                change: fm.scalar("change").unwrap_or_default().to_string(),
            });
        }
    }
    Ok(changes)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 datetime (date component compared).
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
