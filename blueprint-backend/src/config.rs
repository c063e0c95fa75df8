use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    /// Override for the corpus root directory
    pub const DATA_DIR: &str = "BLUEPRINT_DATA_DIR";
    /// Override for the persisted app registry file
    pub const APPS_FILE: &str = "BLUEPRINT_APPS_FILE";
    /// Set to "1" or "true" to skip static frontend serving (for a separate dev server)
    pub const DISABLE_FRONTEND: &str = "DISABLE_FRONTEND";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3001;
    pub const DATA_DIR: &str = "data";
    pub const APPS_FILE: &str = "config/apps.json";
}

/// Returns the absolute path to the blueprint-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// to blueprint-backend/ regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the document corpus root directory
pub fn data_dir() -> PathBuf {
    match env::var(env_vars::DATA_DIR) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => backend_dir().join(defaults::DATA_DIR),
    }
}

/// Get the path of the persisted app registry file.
/// Lives inside the corpus by default so one directory holds all state.
pub fn apps_file_path() -> PathBuf {
    match env::var(env_vars::APPS_FILE) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => data_dir().join(defaults::APPS_FILE),
    }
}

/// Get the HTTP port
pub fn port() -> u16 {
    env::var(env_vars::PORT)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults::PORT)
}

/// Locate the frontend dist directory, if serving is enabled and a build exists.
/// Checks ./dist first, then ../dist (for running from a subdirectory).
pub fn frontend_dist() -> Option<PathBuf> {
    let disabled = env::var(env_vars::DISABLE_FRONTEND)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);
    if disabled {
        return None;
    }
    for candidate in ["./dist", "../dist"] {
        let path = PathBuf::from(candidate);
        if path.join("index.html").exists() {
            return Some(path);
        }
    }
    None
}
