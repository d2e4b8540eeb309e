//! Relational data store.
//!
//! # Data Flow
//! ```text
//! Route handler
//!     → Store (explicit handle, cloned into AppState)
//!     → projects.rs / palettes.rs (one statement per operation)
//!     → SqlitePool
//! ```
//!
//! # Design Decisions
//! - The store is the only source of truth; nothing is cached in process
//! - Payload values are bound as received; the schema and foreign keys decide what is accepted
//! - In-memory databases are pinned to a single connection that never expires

pub mod migrations;
pub mod palettes;
pub mod projects;
pub mod seed;

use std::str::FromStr;

use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use thiserror::Error;

use crate::config::DatabaseProfile;

/// Errors raised by the data store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("migration {version} ({name}) failed: {source}")]
    Migration {
        version: i64,
        name: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Handle to the relational store. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open a pool for the given connection profile.
    pub async fn connect(profile: &DatabaseProfile) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&profile.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if profile.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(profile.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(url = %profile.url, "Connected to database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Outstanding clones become unusable.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}

/// Bind a JSON payload value with the closest SQLite type.
fn bind_json<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s.clone()),
        other => query.bind(other.to_string()),
    }
}

/// Look up `key` in a payload, treating absence as null.
fn field<'a>(payload: &'a serde_json::Map<String, Value>, key: &str) -> &'a Value {
    payload.get(key).unwrap_or(&Value::Null)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Fresh in-memory store with schema and sample data loaded.
    pub async fn seeded_store() -> Store {
        let store = Store::connect(&DatabaseProfile::default()).await.unwrap();
        store.migrate().await.unwrap();
        store.seed().await.unwrap();
        store
    }
}
