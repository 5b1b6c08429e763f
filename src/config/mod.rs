//! Configuration management
//!
//! This module handles loading and parsing configuration for the service.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted data store configuration
    #[serde(default)]
    pub datastore: DatastoreConfig,
    /// Feed assembly configuration
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin for the web client
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Hosted data store (Supabase-style REST) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub base_url: String,
    /// Anonymous API key sent with every request
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Read issues from the legacy `homepage_articles` table instead of
    /// `issue_table`; both shapes normalize to the same canonical model
    #[serde(default)]
    pub legacy_feed: bool,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
            legacy_feed: false,
        }
    }
}

fn default_timeout() -> u64 {
    10
}

/// Feed assembly configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Items per page for unfiltered feed views
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Seconds between scheduled refreshes of the default feed view
    #[serde(default = "default_refresh")]
    pub refresh_seconds: u64,
    /// TTL in seconds for cached per-issue resolved article lists
    #[serde(default = "default_article_ttl")]
    pub article_cache_ttl_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            refresh_seconds: default_refresh(),
            article_cache_ttl_seconds: default_article_ttl(),
        }
    }
}

fn default_page_size() -> usize {
    10
}

fn default_refresh() -> u64 {
    30
}

fn default_article_ttl() -> u64 {
    60
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - HANNUNE_SERVER_HOST
    /// - HANNUNE_SERVER_PORT
    /// - HANNUNE_SERVER_CORS_ORIGIN
    /// - HANNUNE_DATASTORE_URL
    /// - HANNUNE_DATASTORE_API_KEY
    /// - HANNUNE_DATASTORE_TIMEOUT_SECONDS
    /// - HANNUNE_DATASTORE_LEGACY_FEED
    /// - HANNUNE_FEED_PAGE_SIZE
    /// - HANNUNE_FEED_REFRESH_SECONDS
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HANNUNE_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("HANNUNE_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("HANNUNE_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(url) = std::env::var("HANNUNE_DATASTORE_URL") {
            self.datastore.base_url = url;
        }
        if let Ok(key) = std::env::var("HANNUNE_DATASTORE_API_KEY") {
            self.datastore.api_key = key;
        }
        if let Ok(timeout) = std::env::var("HANNUNE_DATASTORE_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.datastore.timeout_seconds = timeout;
            }
        }
        if let Ok(legacy) = std::env::var("HANNUNE_DATASTORE_LEGACY_FEED") {
            match legacy.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.datastore.legacy_feed = true,
                "0" | "false" | "no" => self.datastore.legacy_feed = false,
                _ => {} // Ignore invalid values
            }
        }

        if let Ok(page_size) = std::env::var("HANNUNE_FEED_PAGE_SIZE") {
            if let Ok(page_size) = page_size.parse::<usize>() {
                if page_size > 0 {
                    self.feed.page_size = page_size;
                }
            }
        }
        if let Ok(refresh) = std::env::var("HANNUNE_FEED_REFRESH_SECONDS") {
            if let Ok(refresh) = refresh.parse::<u64>() {
                self.feed.refresh_seconds = refresh;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
