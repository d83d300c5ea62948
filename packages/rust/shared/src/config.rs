//! Application configuration for Brandscope.
//!
//! User config lives at `~/.brandscope/brandscope.toml`.
//! Missing fields fall back to defaults; `--config` selects another file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BrandscopeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "brandscope.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".brandscope";

/// Upper bound on linked stylesheets fetched per page.
pub const MAX_LINKED_STYLESHEETS: usize = 5;

// ---------------------------------------------------------------------------
// Config structs (matching brandscope.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Retrieval policy for pages and stylesheets.
    #[serde(default)]
    pub fetch: FetchSettings,

    /// Where extraction records are stored.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Total attempts for the primary page, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles for each later attempt.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Timeout for the primary page request.
    #[serde(default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Timeout for each linked stylesheet request.
    #[serde(default = "default_stylesheet_timeout_ms")]
    pub stylesheet_timeout_ms: u64,

    /// How many linked stylesheets are fetched per page, at most
    /// [`MAX_LINKED_STYLESHEETS`].
    #[serde(default = "default_max_stylesheets")]
    pub max_stylesheets: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            page_timeout_ms: default_page_timeout_ms(),
            stylesheet_timeout_ms: default_stylesheet_timeout_ms(),
            max_stylesheets: default_max_stylesheets(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}
fn default_initial_delay_ms() -> u64 {
    1000
}
fn default_page_timeout_ms() -> u64 {
    10_000
}
fn default_stylesheet_timeout_ms() -> u64 {
    5_000
}
fn default_max_stylesheets() -> usize {
    MAX_LINKED_STYLESHEETS
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path to the libSQL database file. `~` expands to the home directory.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "~/.brandscope/brandscope.db".into()
}

impl StorageSettings {
    /// Resolve `database_path`, expanding a leading `~/`.
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match self.database_path.strip_prefix("~/") {
            Some(rest) => {
                let home = dirs::home_dir().ok_or_else(|| {
                    BrandscopeError::config("could not determine home directory")
                })?;
                Ok(home.join(rest))
            }
            None => Ok(PathBuf::from(&self.database_path)),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.brandscope/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BrandscopeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.brandscope/brandscope.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| BrandscopeError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        BrandscopeError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| BrandscopeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| BrandscopeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| BrandscopeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

impl AppConfig {
    /// Reject values the fetcher cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.max_attempts == 0 {
            return Err(BrandscopeError::config("fetch.max_attempts must be at least 1"));
        }
        if self.fetch.page_timeout_ms == 0 || self.fetch.stylesheet_timeout_ms == 0 {
            return Err(BrandscopeError::config("fetch timeouts must be non-zero"));
        }
        if self.fetch.max_stylesheets > MAX_LINKED_STYLESHEETS {
            return Err(BrandscopeError::config(format!(
                "fetch.max_stylesheets must be at most {MAX_LINKED_STYLESHEETS}"
            )));
        }
        Ok(())
    }
}
