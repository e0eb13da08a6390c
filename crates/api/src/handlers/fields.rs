use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use regragui_core::models::field::{Field, UpdateFieldRequest};
use regragui_db::{repositories, services::fields};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn list_fields(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Field>>, AppError> {
    let fields = repositories::field::list_fields(state.store.as_ref()).await?;
    Ok(Json(fields))
}

pub async fn get_field(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Field>, AppError> {
    Ok(Json(fields::get_field(state.store.as_ref(), &id).await?))
}

/// Creates a field, or replaces the one named by the payload's `id`.
#[axum::debug_handler]
pub async fn save_field(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<Field>,
) -> Result<(StatusCode, Json<Field>), AppError> {
    let field = fields::save_field(state.store.as_ref(), payload, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

#[axum::debug_handler]
pub async fn update_field(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFieldRequest>,
) -> Result<Json<Field>, AppError> {
    let field = fields::update_field(state.store.as_ref(), &id, payload, Utc::now()).await?;
    Ok(Json(field))
}

pub async fn delete_field(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    fields::delete_field(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
