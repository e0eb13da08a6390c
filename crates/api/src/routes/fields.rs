use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/fields",
            get(handlers::fields::list_fields).post(handlers::fields::save_field),
        )
        .route(
            "/api/fields/:id",
            get(handlers::fields::get_field)
                .put(handlers::fields::update_field)
                .delete(handlers::fields::delete_field),
        )
}
