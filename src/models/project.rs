//! Project entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
