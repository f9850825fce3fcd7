//! Application context handed to every handler.

use crate::storage::Storage;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub storage: Storage,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn pool(&self) -> &PgPool {
        self.storage.pool()
    }
}
