mod command;
mod date;
pub mod pagination;

pub use command::*;
pub use date::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    /// Same pool for reads and writes, used by the CLI and tests.
    pub fn single(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

/// The authenticated user on whose behalf a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub is_staff: bool,
}

impl Actor {
    pub fn can_modify(&self, owner_id: i64) -> bool {
        self.is_staff || self.id == owner_id
    }
}

#[doc(hidden)]
pub mod __private {
    pub use anyhow::anyhow;
}
