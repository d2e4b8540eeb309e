//! Sample data set, also the fixture for integration tests.

use crate::store::{Store, StoreError};

struct SeedPalette {
    name: &'static str,
    colors: [&'static str; 5],
}

struct SeedProject {
    name: &'static str,
    palettes: &'static [SeedPalette],
}

const SEED: &[SeedProject] = &[
    SeedProject {
        name: "Sunset Studio",
        palettes: &[
            SeedPalette {
                name: "Dusk",
                colors: ["#FF5E5B", "#D8D8D8", "#FFFFEA", "#00CECB", "#FFED66"],
            },
            SeedPalette {
                name: "Ember",
                colors: ["#2E2E3A", "#BC5D2E", "#BBB8B2", "#A63446", "#FFED66"],
            },
        ],
    },
    SeedProject {
        name: "Harbor",
        palettes: &[SeedPalette {
            name: "Tide",
            colors: ["#0C6291", "#FBFEF9", "#A63446", "#7E1946", "#000004"],
        }],
    },
];

impl Store {
    /// Delete every project and palette, then load the sample data.
    pub async fn seed(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM palettes").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM projects").execute(&mut *tx).await?;

        for project in SEED {
            let project_id: i64 =
                sqlx::query_scalar("INSERT INTO projects (name) VALUES (?) RETURNING id")
                    .bind(project.name)
                    .fetch_one(&mut *tx)
                    .await?;

            for palette in project.palettes {
                sqlx::query(
                    "INSERT INTO palettes (name, color1, color2, color3, color4, color5, project_id)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(palette.name)
                .bind(palette.colors[0])
                .bind(palette.colors[1])
                .bind(palette.colors[2])
                .bind(palette.colors[3])
                .bind(palette.colors[4])
                .bind(project_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        tracing::info!(projects = SEED.len(), "Seed data loaded");
        Ok(())
    }

    /// Load the sample data only into a database with no projects.
    ///
    /// Returns whether the seed ran. Used at startup so restarts never wipe
    /// rows written through the API.
    pub async fn seed_if_empty(&self) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            tracing::info!(projects = count, "Database already populated, skipping seed");
            return Ok(false);
        }
        self.seed().await?;
        Ok(true)
    }
}
