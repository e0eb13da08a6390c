use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use regragui_core::models::field::FieldType;
use regragui_core::models::search::{SearchFilters, SearchResult};
use regragui_db::services::search;
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query string of the booking page: `?centre=&terrain=&date=`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub centre: Option<String>,
    pub terrain: Option<String>,
    pub date: Option<String>,
}

#[axum::debug_handler]
pub async fn search_fields(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, AppError> {
    let filters = SearchFilters::from_params(
        query.centre.as_deref(),
        query.terrain.as_deref(),
        query.date.as_deref(),
        Utc::now().date_naive(),
    )?;

    let results = search::search_available_fields(state.store.as_ref(), &filters).await?;
    Ok(Json(results))
}

pub async fn list_centres(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(search::list_centres(state.store.as_ref()).await?))
}

pub async fn list_field_types(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<FieldType>>, AppError> {
    Ok(Json(search::list_field_types(state.store.as_ref()).await?))
}
