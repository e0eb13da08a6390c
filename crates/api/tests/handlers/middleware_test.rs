use axum::http::StatusCode;
use regragui_api::middleware::error_handling::map_error;
use regragui_core::errors::BookingError;
use rstest::rstest;

use crate::test_utils::seeded_context;

#[rstest]
#[case(BookingError::NotFound("Field not found".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("Slot taken".to_string()), StatusCode::CONFLICT)]
#[case(BookingError::Authentication("Log in".to_string()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("Not authorized".to_string()), StatusCode::FORBIDDEN)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(BookingError::Internal(Box::new(std::io::Error::other("boom"))), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] status: StatusCode) {
    assert_eq!(map_error(error).status(), status);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = seeded_context().await;

    let health = ctx.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<serde_json::Value>()["status"], "ok");

    let version = ctx.server.get("/version").await;
    assert_eq!(version.json::<serde_json::Value>()["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_errors_are_json() {
    let ctx = seeded_context().await;

    let response = ctx.server.get("/api/fields/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>()["error"],
        "Resource not found: Field nope not found"
    );
}

#[tokio::test]
async fn test_server_errors_hide_store_details() {
    let response = map_error(BookingError::Database(eyre::eyre!(
        "error returned from database: relation \"documents\" does not exist"
    )));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Database error");
}
