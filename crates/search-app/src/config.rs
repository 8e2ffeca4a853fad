// File: src/config.rs
// Purpose: Configuration parsing from search-app.toml

use anyhow::{Context, Result};
use search_router::{History, HistoryMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable supplying the deployment base URL
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Application metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    #[serde(default = "default_name")]
    pub name: String,

    /// Heading shown on the home page
    #[serde(default = "default_title")]
    pub title: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL the app is served from (e.g. "/app/"); passed through unvalidated
    #[serde(default)]
    pub base_url: Option<String>,

    /// History mode: web (clean URLs), hash or memory
    #[serde(default)]
    pub history: HistoryMode,

    /// Whether the catch-all "not found" route is active (default: false)
    #[serde(default = "default_false")]
    pub not_found: bool,

    /// Whether route matching is case-sensitive
    #[serde(default = "default_false")]
    pub case_sensitive: bool,

    /// Whether a trailing slash is significant
    #[serde(default = "default_false")]
    pub strict: bool,
}

fn default_name() -> String {
    "search".to_string()
}

fn default_title() -> String {
    "Search".to_string()
}

fn default_false() -> bool {
    false
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            title: default_title(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            history: HistoryMode::default(),
            not_found: false,
            case_sensitive: false,
            strict: false,
        }
    }
}

impl RoutingConfig {
    /// History for the configured mode and base URL
    pub fn history(&self) -> History {
        History::new(self.history, self.base_url.as_deref())
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./search-app.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("search-app.toml")
    }

    /// Replaces the base URL when the build environment supplies one
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.routing.base_url = Some(base_url);
        }
        self
    }

    /// Applies `BASE_URL` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url(std::env::var(BASE_URL_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "search");
        assert_eq!(config.routing.history, HistoryMode::Web);
        assert_eq!(config.routing.base_url, None);
        assert!(!config.routing.not_found);
        assert!(!config.routing.case_sensitive);
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<AppConfig>("").unwrap();
        assert_eq!(config.app.title, "Search");
        assert_eq!(config.routing.history, HistoryMode::Web);

        let file = write_config("  \n");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.app.name, "search");
        assert_eq!(config.routing.base_url, None);
    }

    #[test]
    fn test_load_file() {
        let file = write_config(
            r#"
            [app]
            title = "Find things"

            [routing]
            base_url = "/app/"
            history = "memory"
            strict = true
        "#,
        );
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.app.title, "Find things");
        assert_eq!(config.app.name, "search");
        assert_eq!(config.routing.base_url.as_deref(), Some("/app/"));
        assert_eq!(config.routing.history, HistoryMode::Memory);
        assert!(config.routing.strict);
        assert!(!config.routing.not_found);
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config("[routing\nhistory = ");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    // Only test in the crate touching BASE_URL
    #[test]
    fn test_env_override_precedence() {
        let file = write_config("[routing]\nbase_url = \"/from-file/\"\n");
        let previous = std::env::var(BASE_URL_ENV).ok();

        std::env::remove_var(BASE_URL_ENV);
        let config = AppConfig::load(file.path()).unwrap().with_env_overrides();
        assert_eq!(config.routing.base_url.as_deref(), Some("/from-file/"));

        std::env::set_var(BASE_URL_ENV, "/from-env/");
        let config = AppConfig::load(file.path()).unwrap().with_env_overrides();
        assert_eq!(config.routing.base_url.as_deref(), Some("/from-env/"));

        let config = config.with_base_url(Some("/from-cli/".to_string()));
        assert_eq!(config.routing.base_url.as_deref(), Some("/from-cli/"));

        match previous {
            Some(value) => std::env::set_var(BASE_URL_ENV, value),
            None => std::env::remove_var(BASE_URL_ENV),
        }
    }

    #[test]
    fn test_routing_section() {
        let toml = r#"
            [routing]
            base_url = "/app/"
            history = "hash"
            not_found = true
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.base_url.as_deref(), Some("/app/"));
        assert_eq!(config.routing.history, HistoryMode::Hash);
        assert!(config.routing.not_found);
        assert_eq!(config.routing.history().base(), "/app/#");
    }

    #[test]
    fn test_unknown_history_mode_rejected() {
        let toml = r#"
            [routing]
            history = "browser"
        "#;
        assert!(toml::from_str::<AppConfig>(toml).is_err());
    }

    #[test]
    fn test_base_url_override() {
        let config = AppConfig::default().with_base_url(Some("/deploy/".to_string()));
        assert_eq!(config.routing.base_url.as_deref(), Some("/deploy/"));

        let config = config.with_base_url(None);
        assert_eq!(config.routing.base_url.as_deref(), Some("/deploy/"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist/search-app.toml").unwrap();
        assert_eq!(config.app.name, "search");
    }
}
