//! Standard response envelope: `{code, info?, data?}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn failure(status: StatusCode, info: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            info: Some(info.into()),
            data: None,
        }
    }
}

/// 200 with the given payload.
pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            code: StatusCode::OK.as_u16(),
            info: None,
            data: Some(data),
        }),
    )
}

/// 200 with neither `info` nor `data`.
pub fn ok_empty() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            code: StatusCode::OK.as_u16(),
            info: None,
            data: None,
        }),
    )
}
