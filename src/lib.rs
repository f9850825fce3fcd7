//! Cinema API: movies and their screening schedules over a PostgreSQL store.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod storage;

pub use config::{Config, DatabaseConfig, ServerConfig};
pub use error::{AppError, AppResult, ConfigError};
pub use models::{install, uninstall, Movie, Page, PageRequest, Schedule, PAGE_SIZE};
pub use response::Envelope;
pub use routes::{app, API_PREFIX};
pub use state::AppState;
pub use storage::{ensure_database_exists, ensure_schema, Storage};
