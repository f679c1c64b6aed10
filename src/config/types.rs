// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::users::IdStrategy;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub files: FilesConfig,
    pub users: UsersConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (default, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "default".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound on a connection's lifetime in seconds, 0 disables it
    pub request_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Largest request body accepted by create/update, in bytes
    pub max_body_size: u64,
}

/// Static file configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    pub public_dir: String,
    /// Derive Content-Type from the file extension; when off every file is
    /// labeled `application/json`
    pub detect_content_type: bool,
}

/// User store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UsersConfig {
    #[serde(default)]
    pub id_strategy: IdStrategy,
    /// Start with the two built-in records
    pub seed: bool,
}
