//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;

/// Environment variable naming the active database profile.
pub const ENVIRONMENT_VAR: &str = "PALETTE_PICKER_ENV";

/// Root configuration for the palette service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Database connection profiles.
    pub database: DatabaseConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

impl AppConfig {
    /// The database profile selected by `env`.
    pub fn database_profile(&self, env: Environment) -> &DatabaseProfile {
        match env {
            Environment::Development => &self.database.development,
            Environment::Test => &self.database.test,
            Environment::Production => &self.database.production,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Deployment environment; picks one of the database profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// Read the environment from `PALETTE_PICKER_ENV`, defaulting to development.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One connection profile per environment.
///
/// Each `[database.<env>]` table only overrides the keys it names; the rest
/// keep that environment's own defaults, not the generic profile defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(from = "DatabaseTables")]
pub struct DatabaseConfig {
    pub development: DatabaseProfile,
    pub test: DatabaseProfile,
    pub production: DatabaseProfile,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            development: DatabaseProfile::development(),
            test: DatabaseProfile::test(),
            production: DatabaseProfile::production(),
        }
    }
}

/// `[database]` as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatabaseTables {
    development: ProfileOverrides,
    test: ProfileOverrides,
    production: ProfileOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileOverrides {
    url: Option<String>,
    max_connections: Option<u32>,
    run_migrations: Option<bool>,
    seed: Option<bool>,
}

impl ProfileOverrides {
    fn apply(self, mut profile: DatabaseProfile) -> DatabaseProfile {
        if let Some(url) = self.url {
            profile.url = url;
        }
        if let Some(max_connections) = self.max_connections {
            profile.max_connections = max_connections;
        }
        if let Some(run_migrations) = self.run_migrations {
            profile.run_migrations = run_migrations;
        }
        if let Some(seed) = self.seed {
            profile.seed = seed;
        }
        profile
    }
}

impl From<DatabaseTables> for DatabaseConfig {
    fn from(tables: DatabaseTables) -> Self {
        Self {
            development: tables.development.apply(DatabaseProfile::development()),
            test: tables.test.apply(DatabaseProfile::test()),
            production: tables.production.apply(DatabaseProfile::production()),
        }
    }
}

/// Database connection profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseProfile {
    /// SQLite connection URL (e.g., "sqlite://palettes.db", "sqlite::memory:").
    pub url: String,

    /// Upper bound on pooled connections. In-memory databases always use one.
    pub max_connections: u32,

    /// Apply pending schema migrations on startup.
    pub run_migrations: bool,

    /// Load sample data on startup when the database has no projects.
    pub seed: bool,
}

impl Default for DatabaseProfile {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            run_migrations: true,
            seed: false,
        }
    }
}

impl DatabaseProfile {
    pub fn development() -> Self {
        Self {
            url: "sqlite://palette_picker_dev.db".to_string(),
            seed: true,
            ..Self::default()
        }
    }

    pub fn test() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            seed: true,
            ..Self::default()
        }
    }

    pub fn production() -> Self {
        Self {
            url: "sqlite://palette_picker.db".to_string(),
            max_connections: 10,
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty output for development, JSON for log shipping.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Allow cross-origin requests from any origin.
    pub cors_enabled: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
            cors_enabled: true,
        }
    }
}
