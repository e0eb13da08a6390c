use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use regragui_core::models::field::{Field, FieldType};
use serde_json::json;

use crate::test_utils::{FIELD_ID, seeded_context};

#[tokio::test]
async fn test_field_crud() {
    let ctx = seeded_context().await;

    let created = ctx
        .server
        .post("/api/fields")
        .json(&json!({ "name": "Stade Anfa", "type": "foot11", "centre": "casablanca-centre", "image": "/anfa.jpg" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let anfa: Field = created.json();
    assert!(!anfa.id.is_empty());
    assert!(anfa.created_at.is_some());

    let all: Vec<Field> = ctx.server.get("/api/fields").await.json();
    assert_eq!(all.len(), 2);

    let updated: Field = ctx
        .server
        .put(&format!("/api/fields/{}", anfa.id))
        .json(&json!({ "type": "foot7", "maxPlayers": 14 }))
        .await
        .json();
    assert_eq!(updated.field_type, FieldType::Foot7);
    assert_eq!(updated.max_players, Some(14));
    assert_eq!(updated.name, "Stade Anfa");

    ctx.server
        .delete(&format!("/api/fields/{}", anfa.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .get(&format!("/api/fields/{}", anfa.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let atlas: Field = ctx.server.get(&format!("/api/fields/{}", FIELD_ID)).await.json();
    assert_eq!(atlas.name, "Terrain Atlas");
}

#[tokio::test]
async fn test_field_validation() {
    let ctx = seeded_context().await;

    ctx.server
        .post("/api/fields")
        .json(&json!({ "name": " ", "type": "foot5", "centre": "errachidia", "image": "/x.jpg" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .delete("/api/fields/nope")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
