//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use invhub_app::ports::{ChangeFeed, ChangePublisher, Storage};
use invhub_app::services::inventory::InventoryService;

/// Change bus requirements for the HTTP layer.
pub trait Notifier: ChangePublisher + ChangeFeed + Clone + Send + Sync + 'static {}

impl<T> Notifier for T where T: ChangePublisher + ChangeFeed + Clone + Send + Sync + 'static {}

/// Application state shared across all axum handlers.
///
/// Generic over the storage backend and the change bus to avoid dynamic
/// dispatch. `Clone` is implemented manually so neither type needs to be
/// `Clone` itself.
pub struct AppState<S: Storage, P> {
    /// Every record service plus item-level use-cases.
    pub inventory: Arc<InventoryService<S, P>>,
    /// Flips to `true` when the server starts draining; live streams end then.
    pub shutdown: watch::Receiver<bool>,
}

impl<S: Storage, P> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            inventory: Arc::clone(&self.inventory),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<S: Storage, P: Notifier> AppState<S, P> {
    /// Create a new application state around the inventory service.
    ///
    /// Live streams stay open until the client leaves unless a shutdown
    /// signal is attached with [`AppState::with_shutdown`].
    pub fn new(inventory: InventoryService<S, P>) -> Self {
        let (_, shutdown) = watch::channel(false);
        Self {
            inventory: Arc::new(inventory),
            shutdown,
        }
    }

    /// End every live stream once `shutdown` holds `true`.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = shutdown;
        self
    }
}
