use reqwest::StatusCode;

use crate::helpers::spawn_app;

#[tokio::test]
async fn returns_200_ok() {
    let app = spawn_app().await;

    let response = app.get("/health-check").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn echoes_a_request_id() {
    let app = spawn_app().await;

    let response = app.get("/health-check").await;

    assert!(response.headers().contains_key("x-request-id"));
}
