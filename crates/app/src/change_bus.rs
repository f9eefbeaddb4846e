//! In-process change bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use invhub_domain::change::Change;
use invhub_domain::error::InvHubError;

use crate::ports::{ChangeFeed, ChangePublisher};

/// In-process change bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the change is simply dropped).
pub struct InProcessChangeBus {
    sender: broadcast::Sender<Change>,
}

impl InProcessChangeBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl ChangePublisher for InProcessChangeBus {
    fn publish(&self, change: Change) -> impl Future<Output = Result<(), InvHubError>> + Send {
        // fails only when nobody listens
        let _ = self.sender.send(change);
        async { Ok(()) }
    }
}

impl ChangeFeed for InProcessChangeBus {
    fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.sender.subscribe()
    }
}
