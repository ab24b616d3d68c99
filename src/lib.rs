use std::future::Future;
use std::net::TcpListener;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use error::ApiError;
use structs::api;
use structs::person::NewPerson;

pub mod configuration;
pub mod database;
pub mod error;
pub mod structs;
pub mod telemetry;

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

#[tracing::instrument(name = "get person", skip(pool))]
async fn get_person(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<Json<api::PersonBody>, ApiError> {
    let id: i64 = id.parse().map_err(|_| ApiError::NotFound)?;

    match database::find_person(&pool, id).await {
        Ok(Some(person)) => Ok(Json(person.into())),
        Ok(None) => Err(ApiError::NotFound),
        Err(error) => {
            tracing::warn!(%error, "lookup failed, answering not found");
            Err(ApiError::NotFound)
        }
    }
}

#[tracing::instrument(name = "create person", skip(pool, payload))]
async fn create_person(
    State(pool): State<PgPool>,
    payload: Result<Json<api::CreatePersonBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::info!(%rejection, "rejected request body");
        ApiError::MalformedInput
    })?;

    if database::nickname_exists(&pool, &body.nickname).await? {
        tracing::info!(nickname = %body.nickname, "nickname already taken");
        return Err(ApiError::DuplicateNickname);
    }

    let candidate = NewPerson::try_from(body).map_err(|error| {
        tracing::info!(%error, "validation failed");
        ApiError::from(error)
    })?;

    let person = database::insert_person(&pool, &candidate).await?;
    tracing::info!(id = person.id, "person created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/person/{}", person.id))],
        Json(api::PersonBody::from(person)),
    ))
}

#[tracing::instrument(name = "search persons", skip(pool))]
async fn search_persons(
    State(pool): State<PgPool>,
    Query(query): Query<api::SearchPersonQuery>,
) -> Result<Json<Vec<api::PersonBody>>, ApiError> {
    let found = database::search_persons(&pool, &query.search_term).await?;

    Ok(Json(found.into_iter().map(api::PersonBody::from).collect()))
}

#[tracing::instrument(name = "count persons", skip(pool))]
async fn count_persons(State(pool): State<PgPool>) -> Result<Json<api::CountBody>, ApiError> {
    let count = database::count_persons(&pool).await?;

    Ok(Json(api::CountBody { count }))
}

fn make_request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

pub fn app(pool: PgPool) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/health-check", get(health_check))
        .route("/person", get(search_persons).post(create_person))
        .route("/person/:id", get(get_person))
        .route("/person-count", get(count_persons))
        .with_state(pool)
        .layer(middleware)
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, pool: PgPool, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    listener.set_nonblocking(true)?;
    let listener = tokio::net::TcpListener::from_std(listener)?;

    axum::serve(listener, app(pool))
        .with_graceful_shutdown(shutdown)
        .await
}
