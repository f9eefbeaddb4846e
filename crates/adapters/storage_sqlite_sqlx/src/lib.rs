//! # invhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `invhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `invhub-app` (for port traits) and `invhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod clock_routine_repo;
mod error;
mod item_repo;
mod mix_routine_repo;
mod multi_routine_repo;
mod pool;
mod timer_routine_repo;

pub use clock_routine_repo::SqliteClockRoutineRepository;
pub use error::StorageError;
pub use item_repo::SqliteItemRepository;
pub use mix_routine_repo::SqliteMixRoutineRepository;
pub use multi_routine_repo::SqliteMultiRoutineRepository;
pub use pool::{Config, Database};
pub use timer_routine_repo::SqliteTimerRoutineRepository;

use invhub_app::ports::Storage;

/// [`Storage`] backed by a single `SQLite` database.
pub struct SqliteStorage;

impl Storage for SqliteStorage {
    type Items = SqliteItemRepository;
    type TimerRoutines = SqliteTimerRoutineRepository;
    type ClockRoutines = SqliteClockRoutineRepository;
    type MultiRoutines = SqliteMultiRoutineRepository;
    type MixRoutines = SqliteMixRoutineRepository;
}
