//! Project persistence.

use serde_json::{Map, Value};
use sqlx::{FromRow, Row};

use crate::models::Project;
use crate::store::{bind_json, field, Store, StoreError};

const PROJECT_COLUMNS: &str = "id, name, created_at, updated_at";

impl Store {
    pub async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id");
        let projects = sqlx::query_as::<_, Project>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    pub async fn find_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?");
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    /// Insert a project from a request payload and return its new id.
    pub async fn insert_project(&self, payload: &Map<String, Value>) -> Result<i64, StoreError> {
        let query = sqlx::query("INSERT INTO projects (name) VALUES (?) RETURNING id");
        let row = bind_json(query, field(payload, "name"))
            .fetch_one(&self.pool)
            .await?;
        let id: i64 = row.try_get("id")?;
        tracing::debug!(project_id = id, "Project inserted");
        Ok(id)
    }

    /// Rename a project. `None` when no row has `id`.
    pub async fn update_project(&self, id: i64, name: &Value) -> Result<Option<Project>, StoreError> {
        let sql = format!(
            "UPDATE projects SET name = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? RETURNING {PROJECT_COLUMNS}"
        );
        let row = bind_json(sqlx::query(&sql), name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| Project::from_row(&row)).transpose()?)
    }

    /// Delete a project, returning the number of rows removed.
    pub async fn delete_project(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::store::test_support::seeded_store;

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = seeded_store().await;
        let payload = json!({ "name": "Gallery" });
        let id = store.insert_project(payload.as_object().unwrap()).await.unwrap();

        let project = store.find_project(id).await.unwrap().unwrap();
        assert_eq!(project.name.as_deref(), Some("Gallery"));
    }

    #[tokio::test]
    async fn test_insert_accepts_any_json_type() {
        let store = seeded_store().await;
        let payload = json!({ "name": 42 });
        let id = store.insert_project(payload.as_object().unwrap()).await.unwrap();

        let project = store.find_project(id).await.unwrap().unwrap();
        assert_eq!(project.name.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_none() {
        let store = seeded_store().await;
        assert!(store.update_project(-100, &json!("Nope")).await.unwrap().is_none());

        let first = store.list_projects().await.unwrap().remove(0);
        let renamed = store.update_project(first.id, &json!("Renamed")).await.unwrap().unwrap();
        assert_eq!(renamed.id, first.id);
        assert_eq!(renamed.name.as_deref(), Some("Renamed"));
    }

    #[tokio::test]
    async fn test_delete_removes_one_row() {
        let store = seeded_store().await;
        let payload = json!({ "name": "Short lived" });
        let id = store.insert_project(payload.as_object().unwrap()).await.unwrap();
        let before = store.list_projects().await.unwrap().len();

        assert_eq!(store.delete_project(id).await.unwrap(), 1);
        assert_eq!(store.delete_project(id).await.unwrap(), 0);
        assert_eq!(store.list_projects().await.unwrap().len(), before - 1);
        assert!(store.find_project(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_referenced_project_is_rejected() {
        let store = seeded_store().await;
        let palette = store.list_palettes().await.unwrap().remove(0);
        assert!(store.delete_project(palette.project_id).await.is_err());
    }
}
