use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_CHUNK_THRESHOLD, DEFAULT_LIMIT};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngramConfig {
    pub api: ApiConfig,
    pub scope: ScopeConfig,
    pub retrieval: RetrievalConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// API key for the memory service. Usually set via `ENGRAM_API_KEY`.
    pub api_key: String,
    /// Endpoint override for self-hosted deployments.
    pub base_url: String,
}

/// Scoping inputs for container tags.
///
/// Explicit `container_tags` win; otherwise `project_id` and `user_id` are
/// folded into the service's `sm_project_*` / `sm_user_*` tag convention.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScopeConfig {
    pub container_tags: Vec<String>,
    pub project_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_limit: usize,
    pub chunk_threshold: f64,
    pub include_full_docs: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for EngramConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            scope: ScopeConfig::default(),
            retrieval: RetrievalConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            include_full_docs: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            host: "127.0.0.1".into(),
            port: 8807,
            log_level: "info".into(),
        }
    }
}

impl ScopeConfig {
    /// Resolve the container tags used to scope every search and add call.
    ///
    /// Resolution happens once at construction time; tools and the model
    /// wrapper capture the result, so search and write-back always share the
    /// same scope.
    pub fn resolve_container_tags(&self) -> Vec<String> {
        if !self.container_tags.is_empty() {
            return self.container_tags.clone();
        }
        if let Some(id) = &self.project_id {
            return vec![format!("sm_project_{id}")];
        }
        if let Some(id) = &self.user_id {
            return vec![format!("sm_user_{id}")];
        }
        vec!["sm_project_default".into()]
    }
}

/// Returns `~/.engram/`
pub fn default_engram_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".engram")
}

/// Returns the default config file path: `~/.engram/config.toml`
pub fn default_config_path() -> PathBuf {
    default_engram_dir().join("config.toml")
}

impl EngramConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            EngramConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (ENGRAM_API_KEY, ENGRAM_BASE_URL,
    /// ENGRAM_PROJECT, ENGRAM_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ENGRAM_API_KEY") {
            self.api.api_key = val;
        }
        if let Ok(val) = std::env::var("ENGRAM_BASE_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("ENGRAM_PROJECT") {
            self.scope.project_id = Some(val);
        }
        if let Ok(val) = std::env::var("ENGRAM_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }
}
