use std::path::{Path, PathBuf};

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use serde::{Deserialize, Serialize};

const DEFAULT_RECENT_LISTINGS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    database: String,
    #[serde(default)]
    pub http: HttpConfig,
    /// How many venues and artists the home page shows
    #[serde(default = "default_recent_listings")]
    pub recent_listings: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database() -> String {
    "~/.local/share/showbook/showbook.db".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_recent_listings() -> u64 {
    DEFAULT_RECENT_LISTINGS
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            http: HttpConfig::default(),
            recent_listings: default_recent_listings(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Default location: `<config dir>/showbook/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("showbook").join("config.toml"))
    }

    /// Load the given file, or the default location. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) => path,
                None => {
                    tracing::warn!("No config directory available, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Write the defaults to `path`. Refuses to overwrite an existing file.
    pub fn create_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(eyre!("Config file already exists: {}", path.display()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let contents =
            toml::to_string_pretty(&Self::default()).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(path)
    }

    /// Get expanded database path
    pub fn database_path(&self) -> PathBuf {
        self.expand_path(&self.database)
    }
}
