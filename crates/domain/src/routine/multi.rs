use serde::{Deserialize, Serialize};

use crate::error::InvHubError;
use crate::id::{ItemId, MultiRoutineId};
use crate::record::{Record, RecordKind, require_name};

use super::DeviceBound;

/// When device `device_id` is `status`, switch device `target_name` to
/// `target_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiRoutine {
    pub id: MultiRoutineId,
    pub device_id: String,
    pub name: String,
    pub status: String,
    /// Optional pointer at the second item. Never checked against storage.
    pub target_id: Option<ItemId>,
    pub target_name: String,
    pub target_status: String,
}

impl Record for MultiRoutine {
    type Id = MultiRoutineId;

    const KIND: RecordKind = RecordKind::MultiRoutine;

    fn id(&self) -> MultiRoutineId {
        self.id
    }

    fn set_id(&mut self, id: MultiRoutineId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), InvHubError> {
        require_name(&self.name)
    }
}

impl DeviceBound for MultiRoutine {
    fn device_names(&self) -> Vec<&str> {
        vec![self.device_id.as_str(), self.target_name.as_str()]
    }
}
