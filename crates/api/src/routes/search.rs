use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/search", get(handlers::search::search_fields))
        .route("/api/centres", get(handlers::search::list_centres))
        .route("/api/field-types", get(handlers::search::list_field_types))
}
