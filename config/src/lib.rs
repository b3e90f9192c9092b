//! Configuration for the task list, read from `~/.tasklist/config.toml`.
//!
//! ```toml
//! [app]
//! ascii_only = false
//! high_contrast = false
//!
//! [store]
//! path = "${XDG_DATA_HOME}/tasklist/tasks.db"
//! ```
//!
//! Every section is optional; a missing file means defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use tasklist_types::ui::UiOptions;

/// Environment variable that overrides the database location.
pub const DB_PATH_ENV: &str = "TASKLIST_DB";

const APP_DIR: &str = ".tasklist";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "tasks.db";

#[derive(Debug, Default, Deserialize)]
pub struct TaskListConfig {
    pub app: Option<AppConfig>,
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for markers and borders.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    /// Database file location. `~` and `${VAR}` are expanded.
    pub path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl TaskListConfig {
    /// Load the config from its default location.
    ///
    /// Returns `Ok(None)` when there is no home directory or no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
            })
            .unwrap_or_default()
    }

    fn store_path(&self) -> Option<&str> {
        self.store
            .as_ref()
            .and_then(|store| store.path.as_deref())
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

/// `~/.tasklist`, home of the config, the database, and the logs.
#[must_use]
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Resolve where the task database lives.
///
/// Order: `TASKLIST_DB`, then `[store] path`, then `~/.tasklist/tasks.db`,
/// then `./.tasklist/tasks.db` when there is no home directory.
#[must_use]
pub fn resolve_db_path(config: Option<&TaskListConfig>) -> PathBuf {
    let from_env = env::var(DB_PATH_ENV).ok();
    resolve_db_path_with(from_env.as_deref(), config, dirs::home_dir().as_deref())
}

fn resolve_db_path_with(
    from_env: Option<&str>,
    config: Option<&TaskListConfig>,
    home: Option<&Path>,
) -> PathBuf {
    if let Some(raw) = from_env.map(str::trim).filter(|raw| !raw.is_empty()) {
        return expand_path(raw, home);
    }
    if let Some(raw) = config.and_then(TaskListConfig::store_path) {
        return expand_path(raw, home);
    }
    match home {
        Some(home) => home.join(APP_DIR).join(DB_FILE),
        None => PathBuf::from(APP_DIR).join(DB_FILE),
    }
}

fn expand_path(raw: &str, home: Option<&Path>) -> PathBuf {
    let expanded = expand_env_vars(raw);
    match (expanded.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if expanded == "~" => home.map_or_else(|| PathBuf::from("~"), Path::to_path_buf),
        _ => PathBuf::from(expanded.as_str()),
    }
}

/// Replace `${VAR}` with the variable's value (empty when unset).
///
/// An unclosed `${` is kept literally.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
