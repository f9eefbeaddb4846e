//! Storage port — repository traits for persistence.

use std::future::Future;

use invhub_domain::error::InvHubError;
use invhub_domain::item::Item;
use invhub_domain::record::Record;
use invhub_domain::routine::{ClockRoutine, MixRoutine, MultiRoutine, TimerRoutine};

/// Repository for persisting and querying records of type `T`.
///
/// Every operation forwards to storage as-is: no validation happens here.
pub trait Repository<T: Record> {
    /// Insert a new record.
    fn create(&self, record: T) -> impl Future<Output = Result<T, InvHubError>> + Send;

    /// Get a record by its unique identifier.
    fn get_by_id(&self, id: T::Id)
    -> impl Future<Output = Result<Option<T>, InvHubError>> + Send;

    /// Get all records, ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, InvHubError>> + Send;

    /// Overwrite an existing record.
    fn update(&self, record: T) -> impl Future<Output = Result<T, InvHubError>> + Send;

    /// Delete a record by its unique identifier.
    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), InvHubError>> + Send;
}

/// The set of repositories a storage backend provides.
///
/// Used as a type-level bundle so that services and HTTP state are generic
/// over one parameter instead of five.
pub trait Storage: Send + Sync + 'static {
    type Items: Repository<Item> + Send + Sync + 'static;
    type TimerRoutines: Repository<TimerRoutine> + Send + Sync + 'static;
    type ClockRoutines: Repository<ClockRoutine> + Send + Sync + 'static;
    type MultiRoutines: Repository<MultiRoutine> + Send + Sync + 'static;
    type MixRoutines: Repository<MixRoutine> + Send + Sync + 'static;
}
