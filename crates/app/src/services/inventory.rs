//! Inventory service — the five record families plus item-level use-cases.

use serde::Serialize;

use invhub_domain::error::InvHubError;
use invhub_domain::id::ItemId;
use invhub_domain::item::Item;
use invhub_domain::record::Record;
use invhub_domain::routine::{ClockRoutine, DeviceBound, MixRoutine, MultiRoutine, TimerRoutine};

use super::record_service::RecordService;
use crate::ports::{ChangeFeed, ChangePublisher, Repository, Storage};

/// Everything the item details view shows.
///
/// Timer routines are not tied to a device, so all of them are listed.
/// The other families are filtered by the item's name.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOverview {
    pub item: Item,
    /// Price as shown to the user, e.g. `$4.50`.
    pub formatted_price: String,
    pub out_of_stock: bool,
    pub timer_routines: Vec<TimerRoutine>,
    pub clock_routines: Vec<ClockRoutine>,
    pub multi_routines: Vec<MultiRoutine>,
    pub mix_routines: Vec<MixRoutine>,
}

/// Application service bundling one [`RecordService`] per record family.
pub struct InventoryService<S: Storage, P> {
    items: RecordService<Item, S::Items, P>,
    timer_routines: RecordService<TimerRoutine, S::TimerRoutines, P>,
    clock_routines: RecordService<ClockRoutine, S::ClockRoutines, P>,
    multi_routines: RecordService<MultiRoutine, S::MultiRoutines, P>,
    mix_routines: RecordService<MixRoutine, S::MixRoutines, P>,
}

impl<S, P> InventoryService<S, P>
where
    S: Storage,
    P: ChangePublisher + ChangeFeed + Clone + Send + Sync,
{
    /// Wire every repository of a storage backend to one change publisher.
    pub fn new(
        items: S::Items,
        timer_routines: S::TimerRoutines,
        clock_routines: S::ClockRoutines,
        multi_routines: S::MultiRoutines,
        mix_routines: S::MixRoutines,
        publisher: P,
    ) -> Self {
        Self {
            items: RecordService::new(items, publisher.clone()),
            timer_routines: RecordService::new(timer_routines, publisher.clone()),
            clock_routines: RecordService::new(clock_routines, publisher.clone()),
            multi_routines: RecordService::new(multi_routines, publisher.clone()),
            mix_routines: RecordService::new(mix_routines, publisher),
        }
    }

    #[must_use]
    pub fn items(&self) -> &RecordService<Item, S::Items, P> {
        &self.items
    }

    #[must_use]
    pub fn timer_routines(&self) -> &RecordService<TimerRoutine, S::TimerRoutines, P> {
        &self.timer_routines
    }

    #[must_use]
    pub fn clock_routines(&self) -> &RecordService<ClockRoutine, S::ClockRoutines, P> {
        &self.clock_routines
    }

    #[must_use]
    pub fn multi_routines(&self) -> &RecordService<MultiRoutine, S::MultiRoutines, P> {
        &self.multi_routines
    }

    #[must_use]
    pub fn mix_routines(&self) -> &RecordService<MixRoutine, S::MixRoutines, P> {
        &self.mix_routines
    }

    /// The service handling records of type `T`.
    #[must_use]
    pub fn service<T: Resource<S, P>>(&self) -> &RecordService<T, T::Repo, P> {
        T::service(self)
    }

    /// Take one unit of the item out of stock.
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::NotFound`] for an unknown item,
    /// [`InvHubError::Validation`] when it is out of stock, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn sell_one(&self, id: ItemId) -> Result<Item, InvHubError> {
        let mut item = self.items.get(id).await?;
        item.sell_one()?;
        self.items.update(item).await
    }

    /// The item with every routine that applies to it.
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::NotFound`] for an unknown item, or a storage
    /// error from any repository.
    pub async fn overview(&self, id: ItemId) -> Result<ItemOverview, InvHubError> {
        let item = self.items.get(id).await?;
        let name = item.name.as_str();

        let timer_routines = self.timer_routines.list().await?;
        let clock_routines = bound_to(self.clock_routines.list().await?, name);
        let multi_routines = bound_to(self.multi_routines.list().await?, name);
        let mix_routines = bound_to(self.mix_routines.list().await?, name);

        Ok(ItemOverview {
            formatted_price: item.formatted_price(),
            out_of_stock: item.is_out_of_stock(),
            item,
            timer_routines,
            clock_routines,
            multi_routines,
            mix_routines,
        })
    }
}

fn bound_to<R: DeviceBound>(routines: Vec<R>, device_name: &str) -> Vec<R> {
    routines
        .into_iter()
        .filter(|routine| routine.references(device_name))
        .collect()
}

/// A record type served by [`InventoryService`].
///
/// Lets generic callers (such as HTTP handlers) pick the right
/// [`RecordService`] from the record type alone.
pub trait Resource<S: Storage, P>: Record {
    type Repo: Repository<Self> + Send + Sync + 'static;

    fn service(inventory: &InventoryService<S, P>) -> &RecordService<Self, Self::Repo, P>;
}

macro_rules! impl_resource {
    ($record:ty, $repo:ident, $field:ident) => {
        impl<S: Storage, P> Resource<S, P> for $record {
            type Repo = S::$repo;

            fn service(inventory: &InventoryService<S, P>) -> &RecordService<Self, S::$repo, P> {
                &inventory.$field
            }
        }
    };
}

impl_resource!(Item, Items, items);
impl_resource!(TimerRoutine, TimerRoutines, timer_routines);
impl_resource!(ClockRoutine, ClockRoutines, clock_routines);
impl_resource!(MultiRoutine, MultiRoutines, multi_routines);
impl_resource!(MixRoutine, MixRoutines, mix_routines);
