//! `movies` table: DDL and record-level CRUD.

use crate::error::{AppError, AppResult};
use crate::models::page::{Page, PageRequest};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        duration SMALLINT NOT NULL,
        year SMALLINT NOT NULL
    )
"#;

const DROP_TABLE: &str = "DROP TABLE IF EXISTS movies";

const COLUMNS: &str = "id, title, duration, year";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    /// Running time in minutes.
    pub duration: i16,
    pub year: i16,
}

/// Validated movie fields, as written on create and modify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub duration: i16,
    pub year: i16,
}

impl Movie {
    pub async fn create_table(pool: &PgPool) -> AppResult<()> {
        sqlx::query(CREATE_TABLE).execute(pool).await?;
        Ok(())
    }

    pub async fn drop_table(pool: &PgPool) -> AppResult<()> {
        sqlx::query(DROP_TABLE).execute(pool).await?;
        Ok(())
    }

    pub async fn list(pool: &PgPool, page: PageRequest) -> AppResult<Page<Movie>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await?;
        let list = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {} FROM movies ORDER BY id LIMIT $1 OFFSET $2",
            COLUMNS
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(Page::new(list, total))
    }

    pub async fn find(pool: &PgPool, id: i32) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(&format!("SELECT {} FROM movies WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(pool: &PgPool, input: &NewMovie) -> AppResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            "INSERT INTO movies (title, duration, year) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        ))
        .bind(&input.title)
        .bind(input.duration)
        .bind(input.year)
        .fetch_one(pool)
        .await?;
        tracing::debug!(id = movie.id, "movie created");
        Ok(movie)
    }

    /// Replace every mutable field of an existing movie.
    pub async fn modify(pool: &PgPool, id: i32, input: &NewMovie) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(&format!(
            "UPDATE movies SET title = $1, duration = $2, year = $3 WHERE id = $4 RETURNING {}",
            COLUMNS
        ))
        .bind(&input.title)
        .bind(input.duration)
        .bind(input.year)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Delete a movie. Its schedules go with it (ON DELETE CASCADE).
    pub async fn kill(pool: &PgPool, id: i32) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(not_found(id));
        }
        tracing::debug!(id, "movie deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("movie {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_api_field_names() {
        let movie = Movie {
            id: 1,
            title: "The General".into(),
            duration: 75,
            year: 1926,
        };
        assert_eq!(
            serde_json::to_value(movie).unwrap(),
            serde_json::json!({ "id": 1, "title": "The General", "duration": 75, "year": 1926 })
        );
    }
}
