use reqwest::StatusCode;
use serde_json::json;

use person_service::structs::api::PersonBody;

use crate::helpers::spawn_app;

#[tokio::test]
async fn found_person_is_identical_to_the_created_one() {
    let app = spawn_app().await;
    let created = app
        .create_person("bar", "foo", json!(["Rust", "Ruby"]))
        .await;

    let response = app.get(&format!("/person/{}", created.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<PersonBody>().await.unwrap(), created);
}

#[tokio::test]
async fn not_found_person() {
    let app = spawn_app().await;

    let response = app.get("/person/999999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let app = spawn_app().await;

    let response = app.get("/person/e50408fa-e368-4ccd-9ade-851fdb553e0f").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
