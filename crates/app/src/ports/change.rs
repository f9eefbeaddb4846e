//! Change ports — announce writes and subscribe to them.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast;

use invhub_domain::change::Change;
use invhub_domain::error::InvHubError;

/// Publishes [`Change`]s to interested subscribers.
pub trait ChangePublisher {
    /// Publish a change to all current subscribers.
    fn publish(&self, change: Change) -> impl Future<Output = Result<(), InvHubError>> + Send;
}

/// Source of [`Change`] notifications.
pub trait ChangeFeed {
    /// Receive every change published after this call.
    fn subscribe(&self) -> broadcast::Receiver<Change>;
}

impl<T: ChangePublisher + Send + Sync> ChangePublisher for Arc<T> {
    fn publish(&self, change: Change) -> impl Future<Output = Result<(), InvHubError>> + Send {
        (**self).publish(change)
    }
}

impl<T: ChangeFeed> ChangeFeed for Arc<T> {
    fn subscribe(&self) -> broadcast::Receiver<Change> {
        (**self).subscribe()
    }
}
