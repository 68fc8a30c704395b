use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::pixabay::DEFAULT_BASE_URL;
use crate::session::DEFAULT_PAGE_SIZE;

/// Environment variable that takes precedence over the configured API key.
pub const API_KEY_ENV: &str = "PIXABAY_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub per_page: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
        self
    }

    fn normalized(mut self) -> Self {
        if self.per_page == 0 {
            warn!(
                "Configured per_page is 0, falling back to {}",
                DEFAULT_PAGE_SIZE
            );
            self.per_page = DEFAULT_PAGE_SIZE;
        }
        self
    }
}

/// Returns the project directories for this application.
/// Centralized to ensure consistent paths across all modules.
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "image-finder", "image-finder")
        .context("Could not determine project directories")
}

pub fn config_path() -> Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    Ok(proj_dirs.config_dir().join("config.json"))
}

/// Load the configuration file, then apply the environment override.
/// An unreadable or malformed file falls back to the defaults; the
/// environment key applies either way.
pub fn load_config() -> AppConfig {
    let env_key = std::env::var(API_KEY_ENV).ok();
    match config_path() {
        Ok(path) => load_config_or_default(&path, env_key),
        Err(err) => {
            warn!("Failed to locate config, using defaults: {:#}", err);
            AppConfig::default().with_api_key_override(env_key)
        }
    }
}

fn load_config_or_default(path: &Path, env_key: Option<String>) -> AppConfig {
    load_config_from(path)
        .unwrap_or_else(|err| {
            warn!("Failed to load config, using defaults: {:#}", err);
            AppConfig::default()
        })
        .with_api_key_override(env_key)
}

/// A missing file yields the defaults; a malformed one is an error.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.per_page, 15);
        assert_eq!(config.base_url, "https://pixabay.com/api/");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "api_key": "abc123" }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_zero_per_page_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "per_page": 0 }"#).unwrap();

        assert_eq!(load_config_from(&path).unwrap().per_page, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_broken_file_still_uses_env_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();

        let config = load_config_or_default(&path, Some("env-key".into()));
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        assert_eq!(load_config_or_default(&path, None), AppConfig::default());
    }

    #[test]
    fn test_env_key_overrides_file_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "api_key": "from-file", "per_page": 30 }"#).unwrap();

        let config = load_config_or_default(&path, Some("from-env".into()));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.per_page, 30);
    }

    #[test]
    fn test_api_key_override() {
        let config = AppConfig {
            api_key: Some("from-file".into()),
            ..AppConfig::default()
        };

        let kept = config.clone().with_api_key_override(None);
        assert_eq!(kept.api_key.as_deref(), Some("from-file"));

        let blank = config.clone().with_api_key_override(Some("  ".into()));
        assert_eq!(blank.api_key.as_deref(), Some("from-file"));

        let replaced = config.with_api_key_override(Some(" from-env \n".into()));
        assert_eq!(replaced.api_key.as_deref(), Some("from-env"));
    }
}
