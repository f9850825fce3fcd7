//! HTTP handlers (controllers) for movies and schedules.

pub mod movie;
pub mod schedule;

use crate::error::AppError;

/// Parse a numeric record id from a path segment.
fn parse_id(field: &str, raw: &str) -> Result<i32, AppError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::BadRequest(format!("invalid {} '{}'", field, raw))),
    }
}
