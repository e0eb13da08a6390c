use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/reservations", post(handlers::reservations::create_reservation))
        .route("/api/reservations/mine", get(handlers::reservations::my_reservations))
}
