//! `schedules` table: screenings of a movie, keyed to `movies(id)` with cascading delete.

use crate::error::{AppError, AppResult};
use crate::models::page::{Page, PageRequest};
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Wire format of `dateAndTime`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS schedules (
        id SERIAL PRIMARY KEY,
        movie_id INTEGER NOT NULL REFERENCES movies (id) ON DELETE CASCADE,
        date_and_time TIMESTAMP NOT NULL,
        auditorium SMALLINT NOT NULL
    )
"#;

const CREATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS schedules_movie_id_idx ON schedules (movie_id)";

const DROP_TABLE: &str = "DROP TABLE IF EXISTS schedules";

const COLUMNS: &str = "id, movie_id, date_and_time, auditorium";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i32,
    pub movie_id: i32,
    #[serde(with = "date_time")]
    pub date_and_time: NaiveDateTime,
    pub auditorium: i16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSchedule {
    pub movie_id: i32,
    pub date_and_time: NaiveDateTime,
    pub auditorium: i16,
}

impl Schedule {
    pub async fn create_table(pool: &PgPool) -> AppResult<()> {
        sqlx::query(CREATE_TABLE).execute(pool).await?;
        sqlx::query(CREATE_INDEX).execute(pool).await?;
        Ok(())
    }

    pub async fn drop_table(pool: &PgPool) -> AppResult<()> {
        sqlx::query(DROP_TABLE).execute(pool).await?;
        Ok(())
    }

    /// Screenings of one movie. An unknown movie yields an empty page, not an error.
    pub async fn list(pool: &PgPool, movie_id: i32, page: PageRequest) -> AppResult<Page<Schedule>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules WHERE movie_id = $1")
            .bind(movie_id)
            .fetch_one(pool)
            .await?;
        let list = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules WHERE movie_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
            COLUMNS
        ))
        .bind(movie_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
        Ok(Page::new(list, total))
    }

    pub async fn find(pool: &PgPool, id: i32) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>(&format!("SELECT {} FROM schedules WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(pool: &PgPool, input: &NewSchedule) -> AppResult<Schedule> {
        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            "INSERT INTO schedules (movie_id, date_and_time, auditorium) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        ))
        .bind(input.movie_id)
        .bind(input.date_and_time)
        .bind(input.auditorium)
        .fetch_one(pool)
        .await
        .map_err(|e| missing_movie(e.into(), input.movie_id))?;
        tracing::debug!(id = schedule.id, movie_id = schedule.movie_id, "schedule created");
        Ok(schedule)
    }

    pub async fn modify(pool: &PgPool, id: i32, input: &NewSchedule) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>(&format!(
            "UPDATE schedules SET movie_id = $1, date_and_time = $2, auditorium = $3 WHERE id = $4 RETURNING {}",
            COLUMNS
        ))
        .bind(input.movie_id)
        .bind(input.date_and_time)
        .bind(input.auditorium)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| missing_movie(e.into(), input.movie_id))?
        .ok_or_else(|| not_found(id))
    }

    pub async fn kill(pool: &PgPool, id: i32) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(not_found(id));
        }
        tracing::debug!(id, "schedule deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("schedule {}", id))
}

fn missing_movie(err: AppError, movie_id: i32) -> AppError {
    if err.is_foreign_key_violation() {
        AppError::Validation(format!("movieId {} does not reference an existing movie", movie_id))
    } else {
        err
    }
}

/// Parse `YYYY-MM-DD HH:MM` into a timestamp.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT).ok()
}

mod date_time {
    use super::DATE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(DATE_TIME_FORMAT))
    }
}
