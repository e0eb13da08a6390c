use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use regragui_core::models::session::{LoginResponse, Session};
use serde_json::json;

use crate::test_utils::seeded_context;

#[tokio::test]
async fn test_login_resolve_logout() {
    let ctx = seeded_context().await;

    let anonymous: Session = ctx.server.get("/api/session").await.json();
    assert_eq!(anonymous, Session::anonymous());

    let login: LoginResponse = ctx
        .server
        .post("/api/session/login")
        .json(&json!({ "email": "ahmed@example.ma", "password": "x" }))
        .await
        .json();
    assert_eq!(login.user.name, "Ahmed");
    let bearer = HeaderValue::from_str(&format!("Bearer {}", login.token)).unwrap();

    let session: Session = ctx
        .server
        .get("/api/session")
        .add_header(AUTHORIZATION, bearer.clone())
        .await
        .json();
    assert_eq!(session.user, Some(login.user));

    ctx.server
        .post("/api/session/logout")
        .add_header(AUTHORIZATION, bearer.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let after: Session = ctx
        .server
        .get("/api/session")
        .add_header(AUTHORIZATION, bearer)
        .await
        .json();
    assert_eq!(after, Session::anonymous());
}

#[tokio::test]
async fn test_login_rejections() {
    let ctx = seeded_context().await;

    ctx.server
        .post("/api/session/login")
        .json(&json!({ "email": "not-an-email", "password": "x" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .post("/api/session/login")
        .json(&json!({ "email": "ahmed@example.ma", "password": "" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
