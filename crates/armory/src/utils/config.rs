//! Application configuration management utilities.

use camino::Utf8PathBuf;
use directories_next::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;

/// Author name used for saved builds when none is configured.
pub const DEFAULT_AUTHOR: &str = "local";

/// Application-wide configuration stored in config.toml.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Catalog JSON file. Defaults to `data/catalog.json` next to the executable.
    pub catalog_path: Option<Utf8PathBuf>,

    /// Directory holding `builds.json`. Defaults to the platform data directory.
    pub library_dir: Option<Utf8PathBuf>,

    /// Page that share links point at, e.g. `https://example.com/planner`.
    pub share_base_url: Option<String>,

    /// Name recorded on saved builds.
    pub author: Option<String>,

    /// Season number recorded on saved builds.
    pub season: Option<u32>,
}

impl AppConfig {
    pub fn catalog_path(&self) -> Utf8PathBuf {
        self.catalog_path.clone().unwrap_or_else(|| {
            install_dir()
                .map(|dir| dir.join("data").join("catalog.json"))
                .unwrap_or_else(|| Utf8PathBuf::from("data/catalog.json"))
        })
    }

    pub fn library_dir(&self) -> Option<Utf8PathBuf> {
        self.library_dir.clone().or_else(default_library_dir)
    }

    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or(DEFAULT_AUTHOR)
    }
}

/// Returns the directory where the current executable resides.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns the default configuration file path (config.toml next to the executable).
pub fn default_config_path() -> Option<Utf8PathBuf> {
    install_dir().map(|dir| dir.join("config.toml"))
}

/// Returns the per-user data directory for saved builds.
pub fn default_library_dir() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", "armory")?;
    Utf8PathBuf::from_path_buf(dirs.data_dir().join("library")).ok()
}

/// Loads the application configuration from config.toml.
/// Returns default configuration if file doesn't exist or cannot be parsed.
pub fn load_config() -> AppConfig {
    if let Some(path) = default_config_path() {
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match parse_config(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => tracing::warn!("Ignoring invalid config file {}: {}", path, e),
                },
                Err(e) => tracing::warn!("Failed to read config file {}: {}", path, e),
            }
        }
    }
    AppConfig::default()
}

/// Saves the application configuration to config.toml.
pub fn save_config(cfg: &AppConfig) -> io::Result<()> {
    if let Some(path) = default_config_path() {
        fs::write(&path, render_config(cfg)?)
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config path",
        ))
    }
}

fn parse_config(content: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(content)
}

fn render_config(cfg: &AppConfig) -> io::Result<String> {
    toml::to_string_pretty(cfg).map_err(io::Error::other)
}
