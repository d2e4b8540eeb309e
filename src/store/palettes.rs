//! Palette persistence and color search.

use serde_json::{Map, Value};
use sqlx::{FromRow, Row};

use crate::models::{filter_by_color, ColorSlot, Palette};
use crate::store::{bind_json, field, Store, StoreError};

const PALETTE_COLUMNS: &str =
    "id, name, color1, color2, color3, color4, color5, project_id, created_at, updated_at";

impl Store {
    pub async fn list_palettes(&self) -> Result<Vec<Palette>, StoreError> {
        let sql = format!("SELECT {PALETTE_COLUMNS} FROM palettes ORDER BY id");
        let palettes = sqlx::query_as::<_, Palette>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(palettes)
    }

    pub async fn find_palette(&self, id: i64) -> Result<Option<Palette>, StoreError> {
        let sql = format!("SELECT {PALETTE_COLUMNS} FROM palettes WHERE id = ?");
        let palette = sqlx::query_as::<_, Palette>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(palette)
    }

    /// Palettes using `color` in any of their five slots.
    pub async fn palettes_with_color(&self, color: &str) -> Result<Vec<Palette>, StoreError> {
        let palettes = self.list_palettes().await?;
        Ok(filter_by_color(palettes, color))
    }

    /// Insert a palette from a request payload and return its new id.
    ///
    /// `project_id` must reference an existing project; the foreign key rejects it otherwise.
    pub async fn insert_palette(&self, payload: &Map<String, Value>) -> Result<i64, StoreError> {
        let mut query = sqlx::query(
            "INSERT INTO palettes (name, color1, color2, color3, color4, color5, project_id)
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        );
        for key in ["name", "color1", "color2", "color3", "color4", "color5", "project_id"] {
            query = bind_json(query, field(payload, key));
        }

        let row = query.fetch_one(&self.pool).await?;
        let id: i64 = row.try_get("id")?;
        tracing::debug!(palette_id = id, "Palette inserted");
        Ok(id)
    }

    /// Overwrite a single color slot. `None` when no row has `id`.
    pub async fn update_palette_color(
        &self,
        id: i64,
        slot: ColorSlot,
        color: &Value,
    ) -> Result<Option<Palette>, StoreError> {
        let sql = format!(
            "UPDATE palettes SET {} = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING {PALETTE_COLUMNS}",
            slot.column()
        );
        let row = bind_json(sqlx::query(&sql), color)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| Palette::from_row(&row)).transpose()?)
    }

    /// Delete a palette, returning the number of rows removed.
    pub async fn delete_palette(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM palettes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::test_support::seeded_store;

    #[tokio::test]
    async fn test_insert_palette_for_existing_project() {
        let store = seeded_store().await;
        let project = store.list_projects().await.unwrap().remove(0);
        let payload = json!({
            "color1": "#111111", "color2": "#222222", "color3": "#333333",
            "color4": "#444444", "color5": "#555555", "project_id": project.id,
        });

        let id = store.insert_palette(payload.as_object().unwrap()).await.unwrap();
        let palette = store.find_palette(id).await.unwrap().unwrap();
        assert_eq!(palette.name, None);
        assert_eq!(palette.color3.as_deref(), Some("#333333"));
        assert_eq!(palette.project_id, project.id);
    }

    #[tokio::test]
    async fn test_insert_palette_for_unknown_project_fails() {
        let store = seeded_store().await;
        let payload = json!({
            "color1": "#111111", "color2": "#222222", "color3": "#333333",
            "color4": "#444444", "color5": "#555555", "project_id": 9999,
        });

        let err = store.insert_palette(payload.as_object().unwrap()).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_update_color_touches_one_slot() {
        let store = seeded_store().await;
        let before = store.list_palettes().await.unwrap().remove(0);

        let after = store
            .update_palette_color(before.id, ColorSlot::Color1, &json!("#ABCDEF"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.color1.as_deref(), Some("#ABCDEF"));
        assert_eq!(after.color2, before.color2);
        assert_eq!(after.color5, before.color5);
        assert_eq!(after.name, before.name);

        let missing = store
            .update_palette_color(-1, ColorSlot::Color1, &json!("#ABCDEF"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_color_search() {
        let store = seeded_store().await;

        let shared = store.palettes_with_color("#A63446").await.unwrap();
        let names: Vec<_> = shared.iter().filter_map(|p| p.name.as_deref()).collect();
        assert_eq!(names, vec!["Ember", "Tide"]);

        let single = store.palettes_with_color("#D8D8D8").await.unwrap();
        assert_eq!(single.len(), 1);
        assert!(store.palettes_with_color("#NOPE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_palette() {
        let store = seeded_store().await;
        let palette = store.list_palettes().await.unwrap().remove(0);

        assert_eq!(store.delete_palette(palette.id).await.unwrap(), 1);
        assert!(store.find_palette(palette.id).await.unwrap().is_none());
    }
}
