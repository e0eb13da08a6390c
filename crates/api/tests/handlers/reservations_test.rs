use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use pretty_assertions::assert_eq;
use regragui_core::models::reservation::{Reservation, ReservationStatus};
use regragui_core::models::session::LoginResponse;
use regragui_core::week::{day_key_of, week_key_of};
use regragui_db::repositories::weekly_slots;
use serde_json::json;

use crate::test_utils::{FIELD_ID, booking_body, seeded_context};

#[tokio::test]
async fn test_booking_claims_slot() {
    let ctx = seeded_context().await;

    let response = ctx
        .server
        .post("/api/reservations")
        .json(&booking_body(ctx.date, "18:00"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let reservation: Reservation = response.json();
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.price, 200);
    assert_eq!(reservation.user_email, "anonymous");

    let doc = weekly_slots::get_weekly_slots(ctx.store(), FIELD_ID, week_key_of(ctx.date))
        .await
        .unwrap()
        .unwrap();
    let slot = doc.find(day_key_of(ctx.date), "18:00".parse().unwrap()).unwrap();
    assert!(!slot.available);
    assert_eq!(slot.reservation_id.as_deref(), Some(reservation.id.as_str()));
}

#[tokio::test]
async fn test_double_booking_is_a_conflict() {
    let ctx = seeded_context().await;

    ctx.server
        .post("/api/reservations")
        .json(&booking_body(ctx.date, "20:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let second = ctx
        .server
        .post("/api/reservations")
        .json(&booking_body(ctx.date, "20:00"))
        .await;
    second.assert_status(StatusCode::CONFLICT);
    assert!(second.json::<serde_json::Value>()["error"].as_str().unwrap().starts_with("Conflict:"));
}

#[tokio::test]
async fn test_invalid_booking() {
    let ctx = seeded_context().await;

    let mut body = booking_body(ctx.date, "18:00");
    body["playerCount"] = json!(1);
    ctx.server
        .post("/api/reservations")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/api/reservations")
        .json(&booking_body(ctx.date, "07:00"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_fills_contact_and_email() {
    let ctx = seeded_context().await;

    let login: LoginResponse = ctx
        .server
        .post("/api/session/login")
        .json(&json!({ "email": "sara.benali@example.ma", "password": "secret" }))
        .await
        .json();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", login.token)).unwrap();

    let mut body = booking_body(ctx.date, "18:00");
    body["contactName"] = json!("");
    let reservation: Reservation = ctx
        .server
        .post("/api/reservations")
        .add_header(AUTHORIZATION, bearer.clone())
        .json(&body)
        .await
        .json();
    assert_eq!(reservation.contact_name, "Sara Benali");
    assert_eq!(reservation.user_email, "sara.benali@example.ma");

    let mine: Vec<Reservation> = ctx
        .server
        .get("/api/reservations/mine")
        .add_header(AUTHORIZATION, bearer)
        .await
        .json();
    assert_eq!(mine.len(), 1);

    ctx.server
        .get("/api/reservations/mine")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_status_change_reopens_slot() {
    let ctx = seeded_context().await;
    let reservation: Reservation = ctx
        .server
        .post("/api/reservations")
        .json(&booking_body(ctx.date, "18:00"))
        .await
        .json();

    let cancelled: Reservation = ctx
        .server
        .put(&format!("/api/admin/reservations/{}/status", reservation.id))
        .json(&json!({ "status": "annulée" }))
        .await
        .json();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    let doc = weekly_slots::get_weekly_slots(ctx.store(), FIELD_ID, week_key_of(ctx.date))
        .await
        .unwrap()
        .unwrap();
    assert!(doc.find(day_key_of(ctx.date), "18:00".parse().unwrap()).unwrap().available);

    ctx.server
        .put(&format!("/api/admin/reservations/{}/status", reservation.id))
        .json(&json!({ "status": "échouée" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let listed: Vec<Reservation> = ctx.server.get("/api/admin/reservations").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, ReservationStatus::Cancelled);
}
