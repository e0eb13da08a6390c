use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use regragui_core::import::{ImportKind, ImportReport};
use regragui_core::models::schedule::{PutSlotRequest, SetAvailabilityRequest, SlotRef, WeekSchedule};
use regragui_core::models::slot::{FlatSlot, Slot, WeeklySlots};
use regragui_core::models::stats::Stats;
use regragui_core::week::{WeekKey, week_key_of};
use regragui_db::repositories::{slot, weekly_slots};
use regragui_db::services::{import, schedule, stats};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub field_id: String,
    /// `YYYY-WNN`; the current week when absent
    pub week: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFilter {
    pub field_id: Option<String>,
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<WeekSchedule>, AppError> {
    let week: WeekKey = match query.week.as_deref().map(str::trim).filter(|w| !w.is_empty()) {
        Some(raw) => raw.parse()?,
        None => week_key_of(Utc::now().date_naive()),
    };

    let grid = schedule::get_week_schedule(state.store.as_ref(), &query.field_id, week, &state.hours).await?;
    Ok(Json(grid))
}

#[axum::debug_handler]
pub async fn put_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<PutSlotRequest>,
) -> Result<Json<Slot>, AppError> {
    Ok(Json(schedule::put_slot(state.store.as_ref(), &payload, Utc::now()).await?))
}

#[axum::debug_handler]
pub async fn set_availability(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SetAvailabilityRequest>,
) -> Result<Json<Slot>, AppError> {
    Ok(Json(schedule::set_availability(state.store.as_ref(), &payload, Utc::now()).await?))
}

#[axum::debug_handler]
pub async fn remove_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SlotRef>,
) -> Result<Json<Slot>, AppError> {
    Ok(Json(schedule::remove_slot(state.store.as_ref(), &payload, Utc::now()).await?))
}

pub async fn list_weekly_slots(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<FieldFilter>,
) -> Result<Json<Vec<WeeklySlots>>, AppError> {
    let docs = match &filter.field_id {
        Some(field_id) => weekly_slots::find_by_field(state.store.as_ref(), field_id).await?,
        None => weekly_slots::list_weekly_slots(state.store.as_ref()).await?,
    };
    Ok(Json(docs))
}

pub async fn list_flat_slots(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<FieldFilter>,
) -> Result<Json<Vec<FlatSlot>>, AppError> {
    let slots = match &filter.field_id {
        Some(field_id) => slot::find_slots_by_field(state.store.as_ref(), field_id).await?,
        None => slot::list_slots(state.store.as_ref()).await?,
    };
    Ok(Json(slots))
}

/// Imports a JSON array of `kind` records. Rejected records are listed in
/// the report; the request itself only fails when the body is not an array.
#[axum::debug_handler]
pub async fn import_records(
    State(state): State<Arc<ApiState>>,
    Path(kind): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<ImportReport>, AppError> {
    let kind: ImportKind = kind.parse()?;
    let report = import::import_records(state.store.as_ref(), kind, &payload, Utc::now()).await?;
    Ok(Json(report))
}

pub async fn get_stats(State(state): State<Arc<ApiState>>) -> Result<Json<Stats>, AppError> {
    Ok(Json(stats::collect_stats(state.store.as_ref()).await?))
}
