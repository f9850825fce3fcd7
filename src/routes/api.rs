//! Movie and schedule routes, mounted under [`API_PREFIX`](super::API_PREFIX).

use crate::handlers::{movie, schedule};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/movies", get(movie::list))
        .route("/movies/:page", get(movie::list_page))
        .route("/movie", post(movie::create).put(movie::modify))
        .route("/movie/:id", get(movie::find).delete(movie::kill))
        .route("/schedules/:movie_id", get(schedule::list))
        .route("/schedules/:movie_id/:page", get(schedule::list_page))
        .route("/schedule", post(schedule::create).put(schedule::modify))
        .route("/schedule/:id", get(schedule::find).delete(schedule::kill))
        .with_state(state)
}
