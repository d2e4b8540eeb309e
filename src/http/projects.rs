//! Project routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::request::JsonPayload;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::http::validation::{parse_int, parse_path_id, DELETE_BY_ID, PROJECT_CREATE, PROJECT_UPDATE};
use crate::models::Project;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectList {
    pub projects: Vec<Project>,
}

fn project_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("A project with the id of {id} does not exist."))
}

/// Echo a created payload back with its new id.
pub(crate) fn with_id(mut payload: Map<String, Value>, id: i64) -> Value {
    payload.insert("id".to_string(), Value::from(id));
    Value::Object(payload)
}

/// `GET /api/v1/projects`
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<ProjectList>, ApiError> {
    let projects = state.store.list_projects().await?;
    Ok(Json(ProjectList { projects }))
}

/// `GET /api/v1/projects/{id}`
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let project = match parse_path_id(&id) {
        Some(project_id) => state.store.find_project(project_id).await?,
        None => None,
    };
    project.map(Json).ok_or_else(|| project_not_found(&id))
}

/// `POST /api/v1/projects`
pub async fn create_project(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    PROJECT_CREATE.validate(&payload)?;

    let id = state.store.insert_project(&payload).await?;
    tracing::info!(project_id = id, "Project created");
    Ok((StatusCode::CREATED, Json(with_id(payload, id))))
}

/// `PUT /api/v1/projects/{id}`
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Project>, ApiError> {
    PROJECT_UPDATE.validate(&payload)?;

    let name = payload.get("name").unwrap_or(&Value::Null);
    let project = match parse_path_id(&id) {
        Some(project_id) => state.store.update_project(project_id, name).await?,
        None => None,
    };
    project.map(Json).ok_or_else(|| project_not_found(&id))
}

/// `DELETE /api/v1/projects` with the id in the body.
pub async fn delete_project(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Value>, ApiError> {
    DELETE_BY_ID.validate(&payload)?;

    let raw_id = payload.get("id").cloned().unwrap_or(Value::Null);
    if let Some(project_id) = parse_int(&raw_id) {
        let removed = state.store.delete_project(project_id).await?;
        tracing::info!(project_id, removed, "Project deleted");
    }
    Ok(Json(raw_id))
}
