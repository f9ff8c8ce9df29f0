//! Configuration management for dispatchdesk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::notice::Locale;

/// Registry endpoint used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the registry API, including the `/api` prefix.
    pub api_base_url: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Display language for messages and dates.
    pub locale: Locale,
    /// Directory where downloaded files are written.
    pub downloads_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/Downloads/dispatchdesk/ for fetched files
        let downloads_dir = dirs::download_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("dispatchdesk");

        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: 30,
            user_agent: "dispatchdesk/0.4 (registry console)".to_string(),
            locale: Locale::default(),
            downloads_dir,
        }
    }
}

impl Settings {
    /// Create settings pointed at a specific registry.
    pub fn with_api_base_url(url: impl Into<String>) -> Self {
        Self {
            api_base_url: url.into(),
            ..Default::default()
        }
    }

    /// Ensure the download directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.downloads_dir)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Registry API base URL.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Display language, "vi" or "en".
    #[serde(default)]
    pub locale: Option<String>,
    /// Directory for downloaded files. Tilde expansion applies.
    #[serde(default)]
    pub downloads: Option<String>,
}

impl Config {
    /// Load configuration from `path`, or from the standard location
    /// (`~/.config/dispatchdesk/config.toml`) when no path is given.
    /// A missing or unreadable file yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Self::default(),
            },
        };
        match fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("ignoring malformed config {}: {err}", path.display());
                    Self::default()
                }
            },
            // No config file found, use defaults
            Err(_) => Self::default(),
        }
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dispatchdesk").join("config.toml"))
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref api_url) = self.api_url {
            settings.api_base_url = api_url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(ref locale) = self.locale {
            match locale.parse::<Locale>() {
                Ok(parsed) => settings.locale = parsed,
                Err(err) => tracing::warn!("ignoring config locale: {err}"),
            }
        }
        if let Some(ref downloads) = self.downloads {
            let path = shellexpand::tilde(downloads);
            settings.downloads_dir = PathBuf::from(path.as_ref());
        }
    }
}

/// Load settings, layering an optional config file over the defaults.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let config = Config::load(config_path);
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings
}
