//! Record service — validated CRUD and watch streams for one record family.

use std::marker::PhantomData;
use std::sync::Arc;

use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use invhub_domain::change::{Change, ChangeOp};
use invhub_domain::error::{InvHubError, NotFoundError};
use invhub_domain::record::Record;

use crate::ports::{ChangeFeed, ChangePublisher, Repository};

/// Application service for records of type `T` stored in `R`.
///
/// Writes are validated, forwarded to the repository, then announced
/// through `P`. Watch streams re-read storage whenever a change of the
/// same family is announced.
pub struct RecordService<T, R, P> {
    repo: Arc<R>,
    publisher: P,
    _record: PhantomData<fn() -> T>,
}

impl<T, R, P> RecordService<T, R, P>
where
    T: Record,
    R: Repository<T> + Send + Sync + 'static,
    P: ChangePublisher + ChangeFeed + Send + Sync,
{
    /// Create a new service backed by the given repository and publisher.
    pub fn new(repo: R, publisher: P) -> Self {
        Self {
            repo: Arc::new(repo),
            publisher,
            _record: PhantomData,
        }
    }

    fn not_found(id: T::Id) -> InvHubError {
        NotFoundError {
            entity: T::KIND.label(),
            id: id.to_string(),
        }
        .into()
    }

    /// Validate and insert a new record under a freshly generated id.
    ///
    /// Any id carried by `record` is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, record), fields(kind = %T::KIND))]
    pub async fn create(&self, mut record: T) -> Result<T, InvHubError> {
        record.set_id(T::Id::default());
        record.normalize();
        record.validate()?;
        let created = self.repo.create(record).await?;
        self.publisher
            .publish(Change::of::<T>(created.id(), ChangeOp::Created))
            .await?;
        tracing::debug!(id = %created.id(), "record created");
        Ok(created)
    }

    /// Look up a record by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: T::Id) -> Result<T, InvHubError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// List all records.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self) -> Result<Vec<T>, InvHubError> {
        self.repo.get_all().await
    }

    /// Validate and overwrite an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::Validation`] if invariants fail,
    /// [`InvHubError::NotFound`] if the record does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, record), fields(kind = %T::KIND, id = %record.id()))]
    pub async fn update(&self, mut record: T) -> Result<T, InvHubError> {
        record.normalize();
        record.validate()?;
        self.get(record.id()).await?;
        let updated = self.repo.update(record).await?;
        self.publisher
            .publish(Change::of::<T>(updated.id(), ChangeOp::Updated))
            .await?;
        Ok(updated)
    }

    /// Delete a record by id.
    ///
    /// Records referring to the deleted one by name are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::NotFound`] if the record does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn delete(&self, id: T::Id) -> Result<(), InvHubError> {
        self.get(id).await?;
        self.repo.delete(id).await?;
        self.publisher
            .publish(Change::of::<T>(id, ChangeOp::Deleted))
            .await
    }

    /// Changes of this record family. `None` means the subscriber lagged
    /// and some changes were lost, so any watcher must re-read.
    fn family_changes(&self) -> impl Stream<Item = Option<Change>> + Send + use<T, R, P> {
        BroadcastStream::new(self.publisher.subscribe()).filter_map(|received| match received {
            Ok(change) if change.kind == T::KIND => Some(Some(change)),
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, kind = %T::KIND, "watcher lagged, forcing re-read");
                Some(None)
            }
        })
    }

    /// Stream of the full record list: current state first, then a fresh
    /// snapshot after each change to this family.
    pub fn watch_all(
        &self,
    ) -> impl Stream<Item = Result<Vec<T>, InvHubError>> + Send + use<T, R, P> {
        let repo = Arc::clone(&self.repo);
        let changes = self.family_changes().map(|_| ());
        tokio_stream::once(()).chain(changes).then(move |()| {
            let repo = Arc::clone(&repo);
            async move { repo.get_all().await }
        })
    }

    /// Stream of a single record: current state first, then a fresh read
    /// after each change that touches it. Yields `None` once deleted.
    pub fn watch(
        &self,
        id: T::Id,
    ) -> impl Stream<Item = Result<Option<T>, InvHubError>> + Send + use<T, R, P> {
        let repo = Arc::clone(&self.repo);
        let changes = self
            .family_changes()
            .filter(move |signal| signal.as_ref().is_none_or(|change| change.concerns::<T>(id)))
            .map(|_| ());
        tokio_stream::once(()).chain(changes).then(move |()| {
            let repo = Arc::clone(&repo);
            async move { repo.get_by_id(id).await }
        })
    }
}
