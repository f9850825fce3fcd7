//! Process configuration: JSON file or environment.

mod loader;
pub mod types;

pub use types::{Config, DatabaseConfig, ServerConfig};
