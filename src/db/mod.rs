//! Database layer: pool, migrations and repositories for SQLite.

mod pool;
mod repositories;

pub use pool::{create_pool, run_migrations, DbPool};
pub use repositories::*;
