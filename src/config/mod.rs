use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub playlists: PlaylistsConfig,
}

/// Where the persisted player state (favorites, history, ...) lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout applied to every playlist/descriptor fetch
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsConfig {
    /// URL of the default-playlists descriptor document
    #[serde(default = "default_descriptor_url")]
    pub descriptor_url: String,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./data/state")
}

fn default_fetch_timeout() -> String {
    "30s".to_string()
}

fn default_user_agent() -> String {
    format!("M3U-Player/{}", env!("CARGO_PKG_VERSION"))
}

fn default_descriptor_url() -> String {
    "playlists.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PlaylistsConfig {
    fn default() -> Self {
        Self {
            descriptor_url: default_descriptor_url(),
        }
    }
}

impl HttpConfig {
    /// Parsed fetch timeout; an unparsable duration string degrades to the
    /// built-in default rather than failing the load.
    pub fn fetch_timeout(&self) -> Duration {
        humantime::parse_duration(&self.fetch_timeout).unwrap_or_else(|e| {
            warn!(
                value = %self.fetch_timeout,
                error = %e,
                "Invalid fetch_timeout, using 30s"
            );
            Duration::from_secs(30)
        })
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> AppResult<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)
                .map_err(|e| AppError::configuration(format!("read {config_file}: {e}")))?;
            toml::from_str(&contents)
                .map_err(|e| AppError::configuration(format!("parse {config_file}: {e}")))
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)
                .map_err(|e| AppError::configuration(e.to_string()))?;
            std::fs::write(config_file, contents)
                .map_err(|e| AppError::configuration(format!("write {config_file}: {e}")))?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.storage.path, PathBuf::from("./data/state"));
        assert_eq!(config.playlists.descriptor_url, "playlists.json");
    }

    #[test]
    fn test_invalid_timeout_degrades_to_default() {
        let http = HttpConfig {
            fetch_timeout: "not-a-duration".to_string(),
            ..HttpConfig::default()
        };
        assert_eq!(http.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[http]\nfetch_timeout = \"5s\"\n").unwrap();
        assert_eq!(config.http.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.storage.path, PathBuf::from("./data/state"));
    }

    #[test]
    fn test_load_from_missing_file_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let config = Config::load_from_file(path_str).unwrap();
        assert_eq!(config.playlists.descriptor_url, "playlists.json");
        assert!(path.exists());

        // Second load reads the file just written
        let reloaded = Config::load_from_file(path_str).unwrap();
        assert_eq!(reloaded.http.fetch_timeout, config.http.fetch_timeout);
    }
}
