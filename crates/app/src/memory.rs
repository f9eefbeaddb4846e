//! In-memory [`Repository`] used by tests across the workspace.

use std::future::Future;
use std::sync::Mutex;

use invhub_domain::error::InvHubError;
use invhub_domain::item::Item;
use invhub_domain::record::Record;
use invhub_domain::routine::{ClockRoutine, MixRoutine, MultiRoutine, TimerRoutine};

use crate::ports::{Repository, Storage};

/// Insert of an id that is already stored, like a primary-key violation.
#[derive(Debug, thiserror::Error)]
#[error("record {0} already exists")]
pub struct DuplicateId(String);

/// Keeps records in insertion order behind a mutex.
pub struct InMemoryRepository<T> {
    records: Mutex<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    fn with_records<O>(&self, f: impl FnOnce(&mut Vec<T>) -> O) -> O {
        let mut guard = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn create(&self, record: T) -> impl Future<Output = Result<T, InvHubError>> + Send {
        let result = self.with_records(|records| {
            if records.iter().any(|r| r.id() == record.id()) {
                let duplicate = DuplicateId(record.id().to_string());
                return Err(InvHubError::Storage(Box::new(duplicate)));
            }
            records.push(record.clone());
            Ok(record)
        });
        async { result }
    }

    fn get_by_id(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, InvHubError>> + Send {
        let found = self.with_records(|records| records.iter().find(|r| r.id() == id).cloned());
        async { Ok(found) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, InvHubError>> + Send {
        let all = self.with_records(|records| records.clone());
        async { Ok(all) }
    }

    fn update(&self, record: T) -> impl Future<Output = Result<T, InvHubError>> + Send {
        self.with_records(|records| {
            if let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) {
                *slot = record.clone();
            }
        });
        async { Ok(record) }
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), InvHubError>> + Send {
        self.with_records(|records| records.retain(|r| r.id() != id));
        async { Ok(()) }
    }
}

/// [`Storage`] made of in-memory repositories.
pub struct InMemoryStorage;

impl Storage for InMemoryStorage {
    type Items = InMemoryRepository<Item>;
    type TimerRoutines = InMemoryRepository<TimerRoutine>;
    type ClockRoutines = InMemoryRepository<ClockRoutine>;
    type MultiRoutines = InMemoryRepository<MultiRoutine>;
    type MixRoutines = InMemoryRepository<MixRoutine>;
}
