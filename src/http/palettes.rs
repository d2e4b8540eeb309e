//! Palette routes.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::projects::with_id;
use crate::http::request::JsonPayload;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::http::validation::{parse_int, parse_path_id, DELETE_BY_ID, PALETTE_CREATE, PALETTE_RECOLOR};
use crate::models::{ColorSlot, Palette};

#[derive(Debug, Serialize, Deserialize)]
pub struct PaletteList {
    pub palettes: Vec<Palette>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredPalettes {
    pub filtered_palettes: Vec<Palette>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorQuery {
    pub chosen_color: Option<String>,
}

fn palette_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Could not find palette with the id: {id}"))
}

/// `GET /api/v1/palettes`
pub async fn list_palettes(State(state): State<AppState>) -> Result<Json<PaletteList>, ApiError> {
    let palettes = state.store.list_palettes().await?;
    Ok(Json(PaletteList { palettes }))
}

/// `GET /api/v1/palettes/{id}`
pub async fn get_palette(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Palette>, ApiError> {
    let palette = match parse_path_id(&id) {
        Some(palette_id) => state.store.find_palette(palette_id).await?,
        None => None,
    };
    palette.map(Json).ok_or_else(|| palette_not_found(&id))
}

/// `GET /api/v1/palettes/chooseColors?chosenColor=<hex>`
pub async fn palettes_by_color(
    State(state): State<AppState>,
    query: Result<Query<ColorQuery>, QueryRejection>,
) -> Result<Json<FilteredPalettes>, ApiError> {
    let Query(query) = query?;
    let color = query.chosen_color.ok_or_else(|| {
        ApiError::Validation(
            "The expected format is: ?chosenColor=<String>. You are missing the chosenColor property."
                .to_string(),
        )
    })?;

    let filtered_palettes = state.store.palettes_with_color(&color).await?;
    tracing::debug!(color = %color, matches = filtered_palettes.len(), "Palettes filtered by color");
    Ok(Json(FilteredPalettes { filtered_palettes }))
}

/// `POST /api/v1/palettes`
pub async fn create_palette(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    PALETTE_CREATE.validate(&payload)?;

    let id = state.store.insert_palette(&payload).await?;
    tracing::info!(palette_id = id, "Palette created");
    Ok((StatusCode::CREATED, Json(with_id(payload, id))))
}

/// `PATCH /api/v1/palettes/{id}` overwriting the slot named by `changeColor`.
pub async fn recolor_palette(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Palette>, ApiError> {
    PALETTE_RECOLOR.validate(&payload)?;

    let change_color = payload.get("changeColor").unwrap_or(&Value::Null);
    let new_color = payload.get("newColor").unwrap_or(&Value::Null);

    let slot: ColorSlot = match change_color {
        Value::String(name) => name.parse::<ColorSlot>(),
        other => other.to_string().parse::<ColorSlot>(),
    }
    .map_err(|e| ApiError::Validation(e.to_string()))?;

    let palette = match parse_path_id(&id) {
        Some(palette_id) => {
            state
                .store
                .update_palette_color(palette_id, slot, new_color)
                .await?
        }
        None => None,
    };
    palette.map(Json).ok_or_else(|| palette_not_found(&id))
}

/// `DELETE /api/v1/palettes` with the id in the body.
pub async fn delete_palette(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<Value>, ApiError> {
    DELETE_BY_ID.validate(&payload)?;

    let raw_id = payload.get("id").cloned().unwrap_or(Value::Null);
    if let Some(palette_id) = parse_int(&raw_id) {
        let removed = state.store.delete_palette(palette_id).await?;
        tracing::info!(palette_id, removed, "Palette deleted");
    }
    Ok(Json(raw_id))
}
