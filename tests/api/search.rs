use reqwest::StatusCode;
use serde_json::json;

use person_service::structs::api::PersonBody;

use crate::helpers::{spawn_app, TestApp};

async fn search(app: &TestApp, path: &str) -> Vec<PersonBody> {
    let response = app.get(path).await;
    assert_eq!(response.status(), StatusCode::OK);
    response.json::<Vec<PersonBody>>().await.unwrap()
}

async fn seeded_app() -> (TestApp, PersonBody) {
    let app = spawn_app().await;
    let person = app
        .create_person("bar", "foo", json!(["Rust", "Ruby"]))
        .await;
    (app, person)
}

#[tokio::test]
async fn search_person_by_name_with_exact_match() {
    let (app, person) = seeded_app().await;

    let found = search(&app, "/person?t=foo").await;

    assert_eq!(found, vec![person]);
}

#[tokio::test]
async fn search_person_by_name_without_exact_match() {
    let (app, person) = seeded_app().await;

    let found = search(&app, "/person?t=FO").await;

    assert_eq!(found, vec![person]);
}

#[tokio::test]
async fn search_person_by_nickname_without_exact_match() {
    let (app, person) = seeded_app().await;

    let found = search(&app, "/person?t=Ba").await;

    assert_eq!(found, vec![person]);
}

#[tokio::test]
async fn search_person_by_stack_without_exact_match() {
    let (app, person) = seeded_app().await;

    let found = search(&app, "/person?t=rus").await;

    assert_eq!(found, vec![person]);
}

#[tokio::test]
async fn search_matching_nothing_is_empty() {
    let (app, _) = seeded_app().await;

    let found = search(&app, "/person?t=haskell").await;

    assert!(found.is_empty());
}

#[tokio::test]
async fn like_wildcards_are_literal() {
    let (app, _) = seeded_app().await;

    assert!(search(&app, "/person?t=%25").await.is_empty());
    assert!(search(&app, "/person?t=_").await.is_empty());
}

#[tokio::test]
async fn absent_term_returns_at_most_fifty() {
    let app = spawn_app().await;
    for i in 0..55 {
        app.create_person(&format!("dev-{i}"), "Dev", json!(null)).await;
    }

    assert_eq!(search(&app, "/person").await.len(), 50);
    assert_eq!(search(&app, "/person?t=").await.len(), 50);
}

#[tokio::test]
async fn absent_term_on_empty_store_is_empty() {
    let app = spawn_app().await;

    assert!(search(&app, "/person").await.is_empty());
}

#[tokio::test]
async fn nul_term_is_an_empty_result() {
    let (app, _) = seeded_app().await;

    let found = search(&app, "/person?t=%00").await;

    assert!(found.is_empty());
}

#[tokio::test]
async fn limit_applies_to_matching_rows_only() {
    let app = spawn_app().await;
    for i in 0..10 {
        app.create_person(&format!("other-{i}"), "Someone", json!(["Go"])).await;
    }
    for i in 0..55 {
        app.create_person(&format!("m-{i}"), "Dev", json!(null)).await;
    }

    let found = search(&app, "/person?t=dev").await;

    assert_eq!(found.len(), 50);
    assert!(found.iter().all(|person| person.name == "Dev"));
}
