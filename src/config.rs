//! Client configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory and covers the endpoints this client talks to plus a couple of
//! UI tuning knobs. Environment variables take precedence over the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_TICKET_API_URL: &str = "http://localhost:3000/tickets";
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the ticket resource
    #[serde(default = "default_ticket_api_url")]
    pub ticket_api_url: String,

    /// User directory endpoint for the requester picker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_api_url: Option<String>,

    /// Page size used when none is selected yet
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Quiescent interval before a search keystroke triggers a fetch
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_ticket_api_url() -> String {
    DEFAULT_TICKET_API_URL.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticket_api_url: default_ticket_api_url(),
            user_api_url: None,
            default_limit: default_limit(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl Config {
    /// Get the path to the config file.
    ///
    /// Resolution order:
    /// 1. `TESSERA_CONFIG` environment variable (if set)
    /// 2. Platform config directory + `tessera/config.yaml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("TESSERA_CONFIG")
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("com", "divmain", "tessera")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config.yaml"))
    }

    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, or defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Ticket API base URL, preferring `TESSERA_TICKET_API_URL`
    pub fn ticket_api_url(&self) -> String {
        if let Ok(url) = env::var("TESSERA_TICKET_API_URL")
            && !url.is_empty()
        {
            return url;
        }

        self.ticket_api_url.clone()
    }

    /// User directory URL, preferring `TESSERA_USER_API_URL`
    pub fn user_api_url(&self) -> Option<String> {
        if let Ok(url) = env::var("TESSERA_USER_API_URL")
            && !url.is_empty()
        {
            return Some(url);
        }

        self.user_api_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_defaults() {
        // SAFETY: #[serial] ensures single-threaded access
        unsafe { env::remove_var("TESSERA_TICKET_API_URL") };
        unsafe { env::remove_var("TESSERA_USER_API_URL") };

        let config = Config::default();
        assert_eq!(config.ticket_api_url(), DEFAULT_TICKET_API_URL);
        assert_eq!(config.user_api_url(), None);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    #[serial]
    fn test_env_var_takes_precedence() {
        // SAFETY: #[serial] ensures single-threaded access
        unsafe { env::set_var("TESSERA_TICKET_API_URL", "https://desk.example.com/tickets") };

        let config = Config::default();
        assert_eq!(config.ticket_api_url(), "https://desk.example.com/tickets");

        unsafe { env::remove_var("TESSERA_TICKET_API_URL") };
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        unsafe { env::remove_var("TESSERA_TICKET_API_URL") };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ticket_api_url: https://desk.internal/tickets\ndefault_limit: 20"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.ticket_api_url(), "https://desk.internal/tickets");
        assert_eq!(config.default_limit, 20);
        // Unlisted keys keep their defaults
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/config.yaml")).unwrap();
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
    }
}
