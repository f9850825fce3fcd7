//! Common routes: health, readiness, version.

use crate::response::{ok, Envelope};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

async fn health() -> impl IntoResponse {
    ok(StatusBody {
        status: "ok",
        database: None,
    })
}

async fn ready(State(state): State<AppState>) -> axum::response::Response {
    match state.storage.ping().await {
        Ok(()) => ok(StatusBody {
            status: "ok",
            database: Some("ok"),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            let status = StatusCode::SERVICE_UNAVAILABLE;
            (
                status,
                Json(Envelope {
                    code: status.as_u16(),
                    info: Some("database unavailable".to_string()),
                    data: Some(StatusBody {
                        status: "degraded",
                        database: Some("unavailable"),
                    }),
                }),
            )
                .into_response()
        }
    }
}

async fn version() -> impl IntoResponse {
    ok(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready (database ping), GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
