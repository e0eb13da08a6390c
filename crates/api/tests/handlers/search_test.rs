use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use regragui_core::models::search::SearchResult;

use crate::test_utils::{FIELD_ID, seeded_context};

#[tokio::test]
async fn test_search_by_centre_and_date() {
    let ctx = seeded_context().await;

    let response = ctx
        .server
        .get("/api/search")
        .add_query_param("centre", "errachidia")
        .add_query_param("terrain", "all")
        .add_query_param("date", ctx.date.to_string())
        .await;
    response.assert_status_ok();

    let results: Vec<SearchResult> = response.json();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].field.id, FIELD_ID);
    let ids: Vec<String> = results[0].time_slots.iter().map(|s| s.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            format!("{}_{}_18:00", FIELD_ID, ctx.date),
            format!("{}_{}_20:00", FIELD_ID, ctx.date),
        ]
    );
}

#[tokio::test]
async fn test_search_filters_exclude_fields() {
    let ctx = seeded_context().await;

    let results: Vec<SearchResult> = ctx
        .server
        .get("/api/search")
        .add_query_param("terrain", "foot11")
        .add_query_param("date", ctx.date.to_string())
        .await
        .json();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_unknown_field_type_matches_nothing() {
    let ctx = seeded_context().await;

    let response = ctx
        .server
        .get("/api/search")
        .add_query_param("terrain", "futsal")
        .add_query_param("date", ctx.date.to_string())
        .await;
    response.assert_status_ok();
    let results: Vec<SearchResult> = response.json();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_rejects_bad_date() {
    let ctx = seeded_context().await;

    ctx.server
        .get("/api/search")
        .add_query_param("date", "10/05/2025")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_filter_values() {
    let ctx = seeded_context().await;

    let centres: Vec<String> = ctx.server.get("/api/centres").await.json();
    assert_eq!(centres, vec!["errachidia".to_string()]);

    let types: Vec<String> = ctx.server.get("/api/field-types").await.json();
    assert_eq!(types, vec!["foot5".to_string()]);
}
