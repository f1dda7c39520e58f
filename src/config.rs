//! Configuration management
//!
//! Settings come from `config.toml` in the platform config directory (or an
//! explicit path), then environment variables override individual values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_SUPABASE_URL: &str = "RECIPEBOX_SUPABASE_URL";
pub const ENV_SUPABASE_KEY: &str = "RECIPEBOX_SUPABASE_KEY";
pub const ENV_TABLE: &str = "RECIPEBOX_TABLE";
pub const ENV_LOG: &str = "RECIPEBOX_LOG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub supabase_url: Option<String>,
    /// Anonymous API key
    pub supabase_key: Option<String>,
    /// Remote table holding the recipes
    pub table: String,
    pub request_timeout_secs: u64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Overrides where favorites, the session and the log file live
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            table: "recipes".to_string(),
            request_timeout_secs: 15,
            log_level: "info".to_string(),
            data_dir: None,
        }
    }
}

/// Connection settings for the hosted recipe table
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Remote settings, or `None` when the URL or key is missing
    pub fn remote(&self) -> Option<RemoteConfig> {
        let url = self.supabase_url.as_deref()?.trim();
        let api_key = self.supabase_key.as_deref()?.trim();
        if url.is_empty() || api_key.is_empty() {
            return None;
        }

        Some(RemoteConfig {
            url: url.to_string(),
            api_key: api_key.to_string(),
            table: self.table.clone(),
            timeout_secs: self.request_timeout_secs.max(1),
        })
    }

    /// Applies environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SUPABASE_URL) {
            self.supabase_url = Some(url);
        }
        if let Some(key) = lookup(ENV_SUPABASE_KEY) {
            self.supabase_key = Some(key);
        }
        if let Some(table) = lookup(ENV_TABLE).filter(|t| !t.trim().is_empty()) {
            self.table = table;
        }
        if let Some(level) = lookup(ENV_LOG).filter(|l| !l.trim().is_empty()) {
            self.log_level = level;
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("recipebox").join("config.toml"))
}

/// Load configuration from disk (defaults when the file is absent) and
/// apply environment overrides
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = path.map(Path::to_path_buf).or_else(default_config_path);

    let mut config = match path {
        Some(path) if path.exists() => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        _ => Config::default(),
    };

    config.apply_env(|name| std::env::var(name).ok());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "supabase_url = \"https://demo.supabase.co\"\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.table, "recipes");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.supabase_url.as_deref(), Some("https://demo.supabase.co"));
        assert!(config.remote().is_none());
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_SUPABASE_URL, "https://env.supabase.co"),
            (ENV_SUPABASE_KEY, "anon-key"),
            (ENV_TABLE, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            supabase_url: Some("https://file.supabase.co".into()),
            ..Config::default()
        };
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        let remote = config.remote().unwrap();
        assert_eq!(remote.url, "https://env.supabase.co");
        assert_eq!(remote.api_key, "anon-key");
        assert_eq!(remote.table, "recipes");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "table = [").unwrap();
        assert!(load(Some(&path)).is_err());
    }
}
