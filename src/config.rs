//! Dashboard settings persisted as TOML under the `.recdash` folder.
//!
//! Config keys: `server`, `panels`, `requests`. A missing file is created
//! with defaults on first load. `RECDASH_BASE_URL` overrides
//! `server.base_url` without touching the file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::dashboard::controller::StalePolicy;
use crate::http_client::Timeouts;

/// Default filename used to store the dashboard configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding `server.base_url`.
pub const BASE_URL_ENV: &str = "RECDASH_BASE_URL";

const MIN_RESPONSE_BYTES: usize = 1024;

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable config directory available")]
    NoConfigDir,
    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config for {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything the dashboard reads from disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub server: ServerSettings,
    pub panels: PanelSettings,
    pub requests: RequestSettings,
}

/// Where the backend lives and how patiently to talk to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    /// Upper bound on a single response body.
    pub max_response_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}

impl ServerSettings {
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
            write: Duration::from_secs(self.read_timeout_secs),
        }
    }
}

/// Container each panel mounts into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub ctr_container: String,
    pub ud_container: String,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            ctr_container: "ctr".to_string(),
            ud_container: "ud".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    /// How overlapping submissions on one panel are reconciled.
    pub stale_responses: StalePolicy,
}

impl DashboardSettings {
    fn normalized(mut self) -> Self {
        self.server.connect_timeout_secs = self.server.connect_timeout_secs.max(1);
        self.server.read_timeout_secs = self.server.read_timeout_secs.max(1);
        self.server.max_response_bytes = self.server.max_response_bytes.max(MIN_RESPONSE_BYTES);
        self
    }

    /// Apply environment overrides on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            self.server.base_url = url;
        }
        self
    }
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings, writing defaults first if the file does not exist yet.
pub fn load_or_default() -> Result<DashboardSettings, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let settings = DashboardSettings::default();
        save_to_path(&settings, &path)?;
        tracing::info!(path = %path.display(), "Wrote default config");
        return Ok(settings);
    }
    load_from(&path)
}

/// Load settings from an explicit path. Missing keys take defaults.
pub fn load_from(path: &Path) -> Result<DashboardSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: DashboardSettings =
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(settings.normalized())
}

/// Persist settings to the default location.
pub fn save(settings: &DashboardSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

/// Write the TOML file atomically so a crash never leaves half a config.
pub fn save_to_path(settings: &DashboardSettings, path: &Path) -> Result<(), ConfigError> {
    let dir = path.parent().ok_or_else(|| ConfigError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other("config path has no parent directory"),
    })?;
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(data.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
