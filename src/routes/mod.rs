//! Router assembly: common routes at the root, entity routes under `/api4`.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::response::Envelope;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Uri},
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api4";

async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

/// Errors produced by the framework itself (e.g. 405) carry no envelope; give them one.
async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.as_bytes().starts_with(b"application/json"))
        .unwrap_or(false);
    if is_json {
        return response;
    }
    let info = status.canonical_reason().unwrap_or("error").to_lowercase();
    (status, Json(Envelope::<()>::failure(status, info))).into_response()
}

/// Full application router with request tracing and a body size cap.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, api_routes(state))
        .fallback(fallback)
        .layer(middleware::map_response(envelope_bare_errors))
        .layer(DefaultBodyLimit::max(server.body_limit))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::Storage;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Router over a pool that never connects; only paths rejected before storage can succeed.
    fn offline_app(server: &ServerConfig) -> Router {
        let db = DatabaseConfig {
            url: Some("postgres://nobody@127.0.0.1:1/nowhere".into()),
            ..DatabaseConfig::default()
        };
        let state = AppState::new(Storage::connect_lazy(&db).unwrap());
        app(state, server)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        send_to(&ServerConfig::default(), request).await
    }

    async fn send_to(server: &ServerConfig, request: Request<Body>) -> (StatusCode, Value) {
        let response = offline_app(server).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_an_envelope() {
        let (status, body) = send(Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "code": 200, "data": { "status": "ok" } }));
    }

    #[tokio::test]
    async fn unknown_route_is_a_404_envelope() {
        let (status, body) = send(Request::builder().uri("/api4/films").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert!(body["info"].as_str().unwrap().contains("/api4/films"));
    }

    #[tokio::test]
    async fn create_movie_missing_field() {
        let (status, body) = send(json_request("POST", "/api4/movie", r#"{"title": "A", "duration": 20}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "code": 422, "info": "validation: year is required" }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_400_envelope() {
        let (status, body) = send(json_request("POST", "/api4/movie", r#"{"title": "#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn mistyped_field_is_rejected() {
        let (status, body) = send(json_request(
            "POST",
            "/api4/movie",
            r#"{"title": "A", "duration": "twenty", "year": 1920}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn put_without_id() {
        let (status, body) = send(json_request(
            "PUT",
            "/api4/schedule",
            r#"{"movieId": 3, "dateAndTime": "2020-09-11 22:00", "auditorium": 1}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["info"], "validation: id is required");
    }

    #[tokio::test]
    async fn schedule_with_bad_timestamp() {
        let (status, body) = send(json_request(
            "POST",
            "/api4/schedule",
            r#"{"movieId": 3, "dateAndTime": "tomorrow", "auditorium": 1}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["info"].as_str().unwrap().contains("dateAndTime"));
    }

    #[tokio::test]
    async fn bad_path_segments() {
        let (status, body) = send(Request::builder().uri("/api4/movie/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["info"], "bad request: invalid id 'abc'");

        let (status, _) = send(Request::builder().uri("/api4/movies/0").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            Request::builder()
                .method("DELETE")
                .uri("/api4/schedule/-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(Request::builder().uri("/api4/schedules/3/x").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_method_is_a_405_envelope() {
        let (status, body) = send(json_request("PATCH", "/api4/movie", "{}")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "code": 405, "info": "method not allowed" }));
    }

    #[tokio::test]
    async fn oversized_body_is_a_413_envelope_with_or_without_length() {
        let server = ServerConfig {
            body_limit: 16,
            ..ServerConfig::default()
        };
        let payload = r#"{"title": "A rather long title", "duration": 20, "year": 1920}"#;

        let (status, body) = send_to(&server, json_request("POST", "/api4/movie", payload)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], 413);

        let mut request = json_request("POST", "/api4/movie", payload);
        request
            .headers_mut()
            .insert("content-length", payload.len().to_string().parse().unwrap());
        let (status, body) = send_to(&server, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], 413);
        assert!(body["info"].as_str().unwrap().starts_with("payload too large"));
    }

    #[tokio::test]
    async fn nul_in_title_is_a_422_envelope() {
        let (status, body) = send(json_request(
            "POST",
            "/api4/movie",
            r#"{"title": "A\u0000B", "duration": 20, "year": 1920}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["info"], "validation: title must not contain NUL characters");
    }
}
