//! Per-entity request bodies and the rules that turn them into model inputs.

use crate::error::AppError;
use crate::models::schedule::{parse_date_time, DATE_TIME_FORMAT};
use crate::models::{NewMovie, NewSchedule};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

const TITLE_MAX_CHARS: usize = 255;
const YEAR_MIN: i64 = 1800;
const YEAR_MAX: i64 = 9999;

/// Checks a decoded body and yields the typed input the model accepts.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, AppError>;

    /// Same as [`Validate::validate`] but also requires the record id (PUT bodies).
    fn validate_with_id(self) -> Result<(i32, Self::Output), AppError>;
}

/// JSON body of POST/PUT /movie. All fields optional so absence is reported by name.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieBody {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub duration: Option<i64>,
    pub year: Option<i64>,
}

/// JSON body of POST/PUT /schedule.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBody {
    pub id: Option<i64>,
    pub movie_id: Option<i64>,
    pub date_and_time: Option<String>,
    pub auditorium: Option<i64>,
}

impl Validate for MovieBody {
    type Output = NewMovie;

    fn validate(self) -> Result<NewMovie, AppError> {
        let title = required("title", self.title)?;
        if title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
        if title.contains('\0') {
            return Err(AppError::Validation("title must not contain NUL characters".into()));
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "title must be at most {} characters",
                TITLE_MAX_CHARS
            )));
        }
        let duration = small_int("duration", required("duration", self.duration)?, 1, i64::from(i16::MAX))?;
        let year = small_int("year", required("year", self.year)?, YEAR_MIN, YEAR_MAX)?;
        Ok(NewMovie { title, duration, year })
    }

    fn validate_with_id(mut self) -> Result<(i32, NewMovie), AppError> {
        let id = record_id("id", self.id.take())?;
        Ok((id, self.validate()?))
    }
}

impl Validate for ScheduleBody {
    type Output = NewSchedule;

    fn validate(self) -> Result<NewSchedule, AppError> {
        let movie_id = record_id("movieId", self.movie_id)?;
        let raw = required("dateAndTime", self.date_and_time)?;
        if !date_time_shape().is_match(&raw) {
            return Err(AppError::Validation(format!(
                "dateAndTime must have the form YYYY-MM-DD HH:MM, got '{}'",
                raw
            )));
        }
        let date_and_time = parse_date_time(&raw).ok_or_else(|| {
            AppError::Validation(format!("dateAndTime '{}' is not a valid {}", raw, DATE_TIME_FORMAT))
        })?;
        let auditorium = small_int("auditorium", required("auditorium", self.auditorium)?, 1, i64::from(i16::MAX))?;
        Ok(NewSchedule {
            movie_id,
            date_and_time,
            auditorium,
        })
    }

    fn validate_with_id(mut self) -> Result<(i32, NewSchedule), AppError> {
        let id = record_id("id", self.id.take())?;
        Ok((id, self.validate()?))
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn record_id(field: &str, value: Option<i64>) -> Result<i32, AppError> {
    let n = required(field, value)?;
    if n < 1 || n > i64::from(i32::MAX) {
        return Err(AppError::Validation(format!("{} must be a positive integer", field)));
    }
    Ok(n as i32)
}

fn small_int(field: &str, n: i64, min: i64, max: i64) -> Result<i16, AppError> {
    if n < min || n > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(n as i16)
}

fn date_time_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("static regex"))
}
