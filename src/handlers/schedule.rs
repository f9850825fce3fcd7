//! Schedule controller: GET /schedules/{movieId}[/{page}], POST|PUT /schedule, GET|DELETE /schedule/{id}.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::models::{PageRequest, Schedule};
use crate::response::{ok, ok_empty};
use crate::service::{ScheduleBody, Validate};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let movie_id = parse_id("movieId", &movie_id)?;
    let page = Schedule::list(state.pool(), movie_id, PageRequest::default()).await?;
    Ok(ok(page))
}

pub async fn list_page(
    State(state): State<AppState>,
    Path((movie_id, page)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let movie_id = parse_id("movieId", &movie_id)?;
    let page = PageRequest::parse(Some(page.as_str()))?;
    let page = Schedule::list(state.pool(), movie_id, page).await?;
    Ok(ok(page))
}

pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let schedule = Schedule::find(state.pool(), id).await?;
    Ok(ok(schedule))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ScheduleBody>,
) -> Result<impl IntoResponse, AppError> {
    let input = body.validate()?;
    let schedule = Schedule::create(state.pool(), &input).await?;
    tracing::info!(id = schedule.id, movie_id = schedule.movie_id, "schedule created");
    Ok(ok(schedule))
}

pub async fn modify(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ScheduleBody>,
) -> Result<impl IntoResponse, AppError> {
    let (id, input) = body.validate_with_id()?;
    let schedule = Schedule::modify(state.pool(), id, &input).await?;
    tracing::info!(id, "schedule modified");
    Ok(ok(schedule))
}

pub async fn kill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    Schedule::kill(state.pool(), id).await?;
    tracing::info!(id, "schedule deleted");
    Ok(ok_empty())
}
