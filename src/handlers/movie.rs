//! Movie controller: GET /movies[/{page}], POST|PUT /movie, GET|DELETE /movie/{id}.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::models::{Movie, PageRequest};
use crate::response::{ok, ok_empty};
use crate::service::{MovieBody, Validate};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let page = Movie::list(state.pool(), PageRequest::default()).await?;
    Ok(ok(page))
}

pub async fn list_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::parse(Some(page.as_str()))?;
    let page = Movie::list(state.pool(), page).await?;
    Ok(ok(page))
}

pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    let movie = Movie::find(state.pool(), id).await?;
    Ok(ok(movie))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<MovieBody>,
) -> Result<impl IntoResponse, AppError> {
    let input = body.validate()?;
    let movie = Movie::create(state.pool(), &input).await?;
    tracing::info!(id = movie.id, title = %movie.title, "movie created");
    Ok(ok(movie))
}

pub async fn modify(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<MovieBody>,
) -> Result<impl IntoResponse, AppError> {
    let (id, input) = body.validate_with_id()?;
    let movie = Movie::modify(state.pool(), id, &input).await?;
    tracing::info!(id, "movie modified");
    Ok(ok(movie))
}

pub async fn kill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id("id", &id)?;
    Movie::kill(state.pool(), id).await?;
    tracing::info!(id, "movie deleted");
    Ok(ok_empty())
}
