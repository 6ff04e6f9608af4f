//! Application directory helpers anchored to a single `.recdash` folder.
//!
//! Config and log files live under the OS config directory by default. The
//! `RECDASH_CONFIG_HOME` variable moves the base elsewhere for tests or
//! portable installs.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".recdash";
/// Environment variable overriding the base config directory.
pub const CONFIG_HOME_ENV: &str = "RECDASH_CONFIG_HOME";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.recdash` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    let path = base.join(APP_DIR_NAME);
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Return the logs directory inside the `.recdash` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    let path = app_root_dir()?.join("logs");
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
    {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_HOME_ENV) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
pub(crate) fn set_config_base_override(path: PathBuf) {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = Some(path);
}

#[cfg(test)]
pub(crate) fn clear_config_base_override() {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = None;
}

/// Serializes tests that touch the process-wide base directory override.
#[cfg(test)]
pub(crate) struct OverrideGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl OverrideGuard {
    pub(crate) fn set(path: PathBuf) -> Self {
        static TEST_LOCK: Mutex<()> = Mutex::new(());
        let lock = TEST_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        set_config_base_override(path);
        Self { _lock: lock }
    }
}

#[cfg(test)]
impl Drop for OverrideGuard {
    fn drop(&mut self) {
        clear_config_base_override();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn uses_override_for_root_dir() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let root = app_root_dir().unwrap();
        assert_eq!(root, base.path().join(APP_DIR_NAME));
        assert!(root.is_dir());
    }

    #[test]
    fn logs_dir_nests_under_root() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let logs = logs_dir().unwrap();
        assert_eq!(logs, base.path().join(APP_DIR_NAME).join("logs"));
        assert!(logs.is_dir());
    }
}
