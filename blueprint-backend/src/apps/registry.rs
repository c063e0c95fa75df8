//! AppRegistry — persisted registration of external consumer apps.
//!
//! One JSON file maps app ids to their records. `last_checked` tracks the
//! last time an app synced against the corpus; combined with the change
//! tracker it answers "which apps have pending changes".

use chrono::Local;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::docs::store::WriteAction;
use crate::error::ApiError;

/// A registered external app. `last_checked` is always `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vercel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub last_checked: String,
}

/// Fields supplied on registration/update. Absent fields keep whatever
/// the existing record holds.
#[derive(Debug, Clone, Default)]
pub struct AppFields {
    pub display_name: Option<String>,
    pub github: Option<String>,
    pub convex: Option<String>,
    pub vercel: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AppsFile {
    apps: BTreeMap<String, AppRecord>,
}

pub struct AppRegistry {
    path: PathBuf,
    // All mutations hold this across read-modify-write, so concurrent
    // upserts cannot drop each other's updates.
    write_lock: Mutex<()>,
}

impl AppRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// The whole id → record mapping. A missing or unreadable file reads
    /// as an empty registry.
    pub fn list(&self) -> Result<BTreeMap<String, AppRecord>, ApiError> {
        Ok(self.load().apps)
    }

    pub fn get(&self, id: &str) -> Result<AppRecord, ApiError> {
        self.load()
            .apps
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("App not found".to_string()))
    }

    /// Register a new app or merge fields into an existing record.
    /// `last_checked` is preserved for existing apps and stamped with
    /// today's date for new ones.
    pub fn upsert(&self, id: &str, fields: AppFields) -> Result<(WriteAction, AppRecord), ApiError> {
        let _guard = self.write_lock.lock();

        let mut file = self.load();
        let existing = file.apps.get(id);
        let action = if existing.is_some() {
            WriteAction::Updated
        } else {
            WriteAction::Created
        };

        let record = AppRecord {
            name: fields
                .display_name
                .or_else(|| existing.map(|e| e.name.clone()))
                .unwrap_or_else(|| id.to_string()),
            github: fields.github.or_else(|| existing.and_then(|e| e.github.clone())),
            convex: fields.convex.or_else(|| existing.and_then(|e| e.convex.clone())),
            vercel: fields.vercel.or_else(|| existing.and_then(|e| e.vercel.clone())),
            url: fields.url.or_else(|| existing.and_then(|e| e.url.clone())),
            last_checked: existing
                .map(|e| e.last_checked.clone())
                .unwrap_or_else(today),
        };

        file.apps.insert(id.to_string(), record.clone());
        self.save(&file)?;
        log::info!("[APPS] {} '{}'", action.as_str(), id);
        Ok((action, record))
    }

    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock();

        let mut file = self.load();
        if file.apps.remove(id).is_none() {
            return Err(ApiError::NotFound("App not found".to_string()));
        }
        self.save(&file)?;
        log::info!("[APPS] deleted '{}'", id);
        Ok(())
    }

    /// Advance `last_checked` to today. The only way it moves after
    /// registration.
    pub fn mark_checked(&self, id: &str) -> Result<String, ApiError> {
        let _guard = self.write_lock.lock();

        let mut file = self.load();
        let record = file.apps.get_mut(id).ok_or_else(|| {
            ApiError::NotFound("App not found. Register it first.".to_string())
        })?;
        record.last_checked = today();
        let stamped = record.last_checked.clone();
        self.save(&file)?;
        Ok(stamped)
    }

    fn load(&self) -> AppsFile {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => AppsFile::default(),
        }
    }

    fn save(&self, file: &AppsFile) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(file)?)?;
        Ok(())
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
