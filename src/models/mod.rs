//! Entity models: schema lifecycle and parameterized SQL per table.

pub mod movie;
pub mod page;
pub mod schedule;

pub use movie::{Movie, NewMovie};
pub use page::{Page, PageRequest, PAGE_SIZE};
pub use schedule::{NewSchedule, Schedule};

use crate::error::AppResult;
use sqlx::PgPool;

/// Create all tables, parents first.
pub async fn install(pool: &PgPool) -> AppResult<()> {
    Movie::create_table(pool).await?;
    Schedule::create_table(pool).await?;
    Ok(())
}

/// Drop all tables, dependents first.
pub async fn uninstall(pool: &PgPool) -> AppResult<()> {
    Schedule::drop_table(pool).await?;
    Movie::drop_table(pool).await?;
    Ok(())
}
