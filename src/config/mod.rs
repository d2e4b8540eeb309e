//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! PALETTE_PICKER_ENV
//!     → Environment (development | test | production)
//!     → AppConfig::database_profile picks the connection profile
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::AppConfig;
pub use schema::DatabaseProfile;
pub use schema::Environment;
pub use schema::ListenerConfig;
pub use schema::{LogFormat, ObservabilityConfig, SecurityConfig, TimeoutConfig};
