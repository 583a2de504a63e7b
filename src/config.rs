//! Configuration module for files-manager.

use serde::Deserialize;
use std::path::Path;

use crate::{FilesError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins (empty = any origin, no credentials).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/files_manager.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// File content storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Directory holding uploaded bytes.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_storage_path() -> String {
    "/tmp/files_manager".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

/// Session cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in seconds, measured from login.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    /// Cache backend: "database" or "memory".
    #[serde(default = "default_session_backend")]
    pub backend: String,
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

fn default_session_backend() -> String {
    "database".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            backend: default_session_backend(),
        }
    }
}

/// Background job queue configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Number of jobs that may wait in the queue before enqueue fails.
    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,
    /// Maximum jobs processed at the same time.
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_max_concurrent_jobs() -> usize {
    4
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_queue_capacity(),
            max_concurrent_jobs: default_max_concurrent_jobs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/files_manager.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// File storage configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Job queue configuration.
    #[serde(default)]
    pub queue: QueueConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FilesError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FilesError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `HOST`, `PORT`: listening address
    /// - `FOLDER_PATH`: content storage root
    /// - `DB_PATH`: SQLite database file
    /// - `SESSION_TTL_SECS`: session lifetime
    /// - `LOG_LEVEL`: log level
    ///
    /// Empty or unparsable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT").and_then(|v| v.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = get("FOLDER_PATH") {
            self.files.storage_path = path;
        }
        if let Some(path) = get("DB_PATH") {
            self.database.path = path;
        }
        if let Some(ttl) = get("SESSION_TTL_SECS").and_then(|v| v.trim().parse().ok()) {
            self.session.ttl_secs = ttl;
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.session.ttl_secs == 0 {
            return Err(FilesError::Config(
                "session.ttl_secs must be greater than zero".to_string(),
            ));
        }
        if !matches!(self.session.backend.as_str(), "database" | "memory") {
            return Err(FilesError::Config(format!(
                "unknown session.backend '{}' (expected 'database' or 'memory')",
                self.session.backend
            )));
        }
        if self.queue.capacity == 0 {
            return Err(FilesError::Config(
                "queue.capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
