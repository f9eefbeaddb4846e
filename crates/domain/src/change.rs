//! Change — notification emitted after a record has been written.
//!
//! Watchers use changes as a signal to re-read the records they display.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordKind};
use crate::time::{Timestamp, now};

/// What happened to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

/// A write that has been applied to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub kind: RecordKind,
    pub id: String,
    pub op: ChangeOp,
    pub at: Timestamp,
}

impl Change {
    /// Describe a write to the record of type `R` with the given id.
    #[must_use]
    pub fn of<R: Record>(id: R::Id, op: ChangeOp) -> Self {
        Self {
            kind: R::KIND,
            id: id.to_string(),
            op,
            at: now(),
        }
    }

    /// Whether this change touches the record `id` of type `R`.
    #[must_use]
    pub fn concerns<R: Record>(&self, id: R::Id) -> bool {
        self.kind == R::KIND && self.id == id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::routine::ClockRoutine;

    #[test]
    fn should_match_only_same_kind_and_id() {
        let item = Item::builder().name("Lamp").build().unwrap();
        let change = Change::of::<Item>(item.id, ChangeOp::Updated);

        assert!(change.concerns::<Item>(item.id));
        assert!(!change.concerns::<Item>(crate::id::ItemId::new()));
        assert_eq!(change.kind, RecordKind::Item);
        assert_ne!(change.kind, <ClockRoutine as Record>::KIND);
    }
}
