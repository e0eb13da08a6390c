use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use regragui_core::import::ImportReport;
use regragui_core::models::schedule::{CellState, WeekSchedule};
use regragui_core::models::slot::{FlatSlot, WeeklySlots};
use regragui_core::models::stats::Stats;
use regragui_core::week::{day_key_of, week_key_of};
use serde_json::json;

use crate::test_utils::{FIELD_ID, booking_body, seeded_context};

#[tokio::test]
async fn test_schedule_grid() {
    let ctx = seeded_context().await;
    let week = week_key_of(ctx.date);
    let day = day_key_of(ctx.date);

    ctx.server
        .post("/api/reservations")
        .json(&booking_body(ctx.date, "20:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let grid: WeekSchedule = ctx
        .server
        .get("/api/admin/schedule")
        .add_query_param("fieldId", FIELD_ID)
        .add_query_param("week", week.to_string())
        .await
        .json();

    assert_eq!(grid.week, week);
    assert_eq!(grid.cell(day, "18:00".parse().unwrap()), Some(&CellState::Available { price: 200 }));
    assert!(matches!(
        grid.cell(day, "20:00".parse().unwrap()),
        Some(CellState::Unavailable { reservation_id: Some(_), .. })
    ));

    ctx.server
        .get("/api/admin/schedule")
        .add_query_param("fieldId", FIELD_ID)
        .add_query_param("week", "2025-W99")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slot_cell_actions() {
    let ctx = seeded_context().await;
    let week = week_key_of(ctx.date).to_string();
    let day = day_key_of(ctx.date).to_string();

    ctx.server
        .put("/api/admin/slots")
        .json(&json!({ "fieldId": FIELD_ID, "week": week, "day": day, "time": "21:00", "price": 300 }))
        .await
        .assert_status_ok();

    ctx.server
        .post("/api/admin/slots/availability")
        .json(&json!({ "fieldId": FIELD_ID, "week": week, "day": day, "time": "21:00", "available": false }))
        .await
        .assert_status_ok();

    let docs: Vec<WeeklySlots> = ctx
        .server
        .get("/api/admin/weekly-slots")
        .add_query_param("fieldId", FIELD_ID)
        .await
        .json();
    assert_eq!(docs.len(), 1);
    let slot = docs[0].find(day_key_of(ctx.date), "21:00".parse().unwrap()).unwrap();
    assert_eq!((slot.price, slot.available), (300, false));

    ctx.server
        .delete("/api/admin/slots")
        .json(&json!({ "fieldId": FIELD_ID, "week": week, "day": day, "time": "21:00" }))
        .await
        .assert_status_ok();
    ctx.server
        .delete("/api/admin/slots")
        .json(&json!({ "fieldId": FIELD_ID, "week": week, "day": day, "time": "21:00" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_import_and_stats() {
    let ctx = seeded_context().await;

    let report: ImportReport = ctx
        .server
        .post("/api/admin/import/slots")
        .json(&json!([
            { "fieldId": FIELD_ID, "time": "18:00", "date": "2025-05-10" },
            { "fieldId": FIELD_ID, "time": "19:00", "available": false },
            { "time": "20:00" }
        ]))
        .await
        .json();
    assert_eq!(report.success, 2);
    assert_eq!(report.errors.len(), 1);

    let flat: Vec<FlatSlot> = ctx.server.get("/api/admin/slots").await.json();
    assert_eq!(flat.len(), 2);

    ctx.server
        .post("/api/admin/import/bookings")
        .json(&json!([]))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .post("/api/admin/import/fields")
        .json(&json!({ "not": "an array" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/api/reservations")
        .json(&booking_body(ctx.date, "18:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let stats: Stats = ctx.server.get("/api/admin/stats").await.json();
    assert_eq!(stats.total_fields, 1);
    assert_eq!(stats.total_slots, 2);
    assert_eq!(stats.available_slots, 1);
    assert_eq!(stats.total_weekly_slots, 1);
    assert_eq!(stats.available_weekly_slots, 1);
    assert_eq!(stats.reservations_by_status["en attente"], 1);
    assert_eq!(stats.reservations_by_status["annulée"], 0);
}
