//! Embedded, ordered schema migrations.

use crate::store::{Store, StoreError};

/// A versioned schema change applied at most once.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_projects",
        sql: include_str!("../../migrations/0001_create_projects.sql"),
    },
    Migration {
        version: 2,
        name: "create_palettes",
        sql: include_str!("../../migrations/0002_create_palettes.sql"),
    },
];

impl Store {
    /// Apply every migration not yet recorded in `schema_migrations`.
    ///
    /// Returns the number of migrations applied by this call.
    pub async fn migrate(&self) -> Result<usize, StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&self.pool)
        .await?;

        let applied: Vec<i64> = sqlx::query_scalar("SELECT version FROM schema_migrations")
            .fetch_all(&self.pool)
            .await?;

        let mut count = 0;
        for migration in MIGRATIONS {
            if applied.contains(&migration.version) {
                tracing::debug!(version = migration.version, name = migration.name, "Migration already applied");
                continue;
            }
            self.apply(migration).await.map_err(|source| StoreError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;
            tracing::info!(version = migration.version, name = migration.name, "Migration applied");
            count += 1;
        }

        Ok(count)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::raw_sql(migration.sql).execute(&mut *tx).await?;
        sqlx::query("INSERT INTO schema_migrations (version, name) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseProfile;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = Store::connect(&DatabaseProfile::default()).await.unwrap();
        assert_eq!(store.migrate().await.unwrap(), MIGRATIONS.len());
        assert_eq!(store.migrate().await.unwrap(), 0);

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('projects', 'palettes') ORDER BY name",
        )
        .fetch_all(store.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec!["palettes", "projects"]);
    }

    #[test]
    fn test_versions_are_ordered() {
        let versions: Vec<_> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }
}
