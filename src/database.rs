//! PostgreSQL access: pool construction, schema bootstrap and the person queries.

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::configuration::{DatabaseConfiguration, PoolConfiguration};
use crate::error::ApiError;
use crate::structs::person::{NewPerson, Person};

pub const SEARCH_LIMIT: i64 = 50;

const CREATE_PERSON_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS person (
        id BIGSERIAL PRIMARY KEY,
        nickname VARCHAR(32) NOT NULL UNIQUE,
        name VARCHAR(100) NOT NULL,
        birth_date DATE NOT NULL,
        stack JSONB
    )
"#;

pub async fn get_database_connection(
    database_config: &DatabaseConfiguration,
    pool_config: &PoolConfiguration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(pool_config.min_connections)
        .max_connections(pool_config.max_connections)
        .max_lifetime(Some(pool_config.max_lifetime()))
        .acquire_timeout(pool_config.acquire_timeout())
        .connect(&database_config.connection_string())
        .await
}

pub async fn initialize_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PERSON_TABLE).execute(pool).await?;
    tracing::info!("person table ready");
    Ok(())
}

pub async fn nickname_exists(pool: &PgPool, nickname: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM person WHERE nickname = $1)")
        .bind(nickname)
        .fetch_one(pool)
        .await
}

/// Inserts the person; the table's unique constraint decides nickname races.
pub async fn insert_person(pool: &PgPool, person: &NewPerson) -> Result<Person, ApiError> {
    sqlx::query_as::<_, Person>(
        r#"
        INSERT INTO person (nickname, name, birth_date, stack)
        VALUES ($1, $2, $3, $4)
        RETURNING id, nickname, name, birth_date, stack
        "#,
    )
    .bind(&person.nickname)
    .bind(&person.name)
    .bind(person.birth_date)
    .bind(&person.stack)
    .fetch_one(pool)
    .await
    .map_err(|error| match error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            ApiError::DuplicateNickname
        }
        other => ApiError::Storage(other),
    })
}

pub async fn find_person(pool: &PgPool, id: i64) -> Result<Option<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(
        "SELECT id, nickname, name, birth_date, stack FROM person WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive substring search over nickname, name and the text of stack.
/// The limit applies to the OR-filtered rows; no ordering is imposed.
pub async fn search_persons(pool: &PgPool, term: &str) -> Result<Vec<Person>, sqlx::Error> {
    // PostgreSQL rejects NUL in text parameters, and no stored value can hold one.
    if term.contains('\0') {
        return Ok(Vec::new());
    }

    let pattern = format!("%{}%", escape_like(term));

    sqlx::query_as::<_, Person>(
        r#"
        SELECT id, nickname, name, birth_date, stack
        FROM person
        WHERE nickname ILIKE $1
           OR name ILIKE $1
           OR stack::text ILIKE $1
        LIMIT $2
        "#,
    )
    .bind(pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn count_persons(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM person")
        .fetch_one(pool)
        .await
}

// Backslash is the default LIKE escape character in PostgreSQL.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
