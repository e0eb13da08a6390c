use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use regragui_core::errors::BookingError;
use regragui_core::models::reservation::{BookingRequest, Reservation, UpdateReservationStatusRequest};
use regragui_db::{repositories, services::booking};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, session::CurrentSession},
};

/// Books a slot. The contact name defaults to the session user's name.
#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    current: CurrentSession,
    Json(mut payload): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    if payload.contact_name.trim().is_empty() {
        if let Some(name) = current.session.display_name() {
            payload.contact_name = name.to_string();
        }
    }

    let reservation = booking::book_slot(
        state.store.as_ref(),
        &payload,
        current.session.user_email(),
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Reservations made by the logged-in user, newest first.
pub async fn my_reservations(
    State(state): State<Arc<ApiState>>,
    current: CurrentSession,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let Some(user) = &current.session.user else {
        return Err(AppError(BookingError::Authentication("Log in to see your reservations".to_string())));
    };
    let reservations = repositories::reservation::find_by_user(state.store.as_ref(), &user.email).await?;
    Ok(Json(reservations))
}

pub async fn list_reservations(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Reservation>>, AppError> {
    let reservations = repositories::reservation::list_reservations(state.store.as_ref()).await?;
    Ok(Json(reservations))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReservationStatusRequest>,
) -> Result<Json<Reservation>, AppError> {
    let reservation =
        booking::update_reservation_status(state.store.as_ref(), &id, payload.status, Utc::now()).await?;
    Ok(Json(reservation))
}
