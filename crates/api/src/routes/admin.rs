use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/reservations", get(handlers::reservations::list_reservations))
        .route(
            "/api/admin/reservations/:id/status",
            put(handlers::reservations::update_status),
        )
        .route("/api/admin/schedule", get(handlers::admin::get_schedule))
        .route(
            "/api/admin/slots",
            get(handlers::admin::list_flat_slots)
                .put(handlers::admin::put_slot)
                .delete(handlers::admin::remove_slot),
        )
        .route(
            "/api/admin/slots/availability",
            post(handlers::admin::set_availability),
        )
        .route("/api/admin/weekly-slots", get(handlers::admin::list_weekly_slots))
        .route("/api/admin/import/:kind", post(handlers::admin::import_records))
        .route("/api/admin/stats", get(handlers::admin::get_stats))
}
