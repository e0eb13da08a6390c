use axum::{Json, extract::State, http::StatusCode};
use regragui_core::models::session::{LoginRequest, LoginResponse, Session};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, session::CurrentSession},
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (token, user) = state.sessions.login(&payload.email, &payload.password).await?;
    Ok(Json(LoginResponse { token, user }))
}

pub async fn current_session(current: CurrentSession) -> Json<Session> {
    Json(current.session)
}

pub async fn logout(State(state): State<Arc<ApiState>>, current: CurrentSession) -> StatusCode {
    if let Some(token) = &current.token {
        if state.sessions.logout(token).await {
            tracing::debug!("Session closed");
        }
    }
    StatusCode::NO_CONTENT
}
