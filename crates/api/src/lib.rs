//! # Regragui booking API
//!
//! HTTP surface of the field booking service: public search and booking,
//! the mock session, and the admin back-office (fields, weekly schedule,
//! reservations, imports, stats).
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract request data and call the db crate's services
//! - **Middleware**: Session resolution and error-to-response mapping
//! - **Config**: Environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Session extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use eyre::Result;
use regragui_core::models::schedule::ScheduleHours;
use regragui_db::store::DocumentStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::middleware::session::SessionStore;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: Arc<dyn DocumentStore>,
    /// Tokens handed out by the mock login
    pub sessions: SessionStore,
    pub hours: ScheduleHours,
}

impl ApiState {
    pub fn new(store: Arc<dyn DocumentStore>, hours: ScheduleHours) -> Self {
        Self {
            store,
            sessions: SessionStore::default(),
            hours,
        }
    }
}

/// Builds the router with every route and request tracing.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::search::routes())
        .merge(routes::fields::routes())
        .merge(routes::reservations::routes())
        .merge(routes::admin::routes())
        .merge(routes::session::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server on the configured address and serves until the
/// listener fails.
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn DocumentStore>) -> Result<()> {
    let state = Arc::new(ApiState::new(store, config.schedule_hours));

    let app = app(state);

    let app = if let Some(origins) = &config.cors_origins {
        app.layer(cors_layer(origins))
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
