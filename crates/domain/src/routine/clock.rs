use serde::{Deserialize, Serialize};

use crate::error::InvHubError;
use crate::id::ClockRoutineId;
use crate::record::{Record, RecordKind, require_name};

use super::DeviceBound;

/// Switch the device named `device_id` to `status` once `duration` is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockRoutine {
    pub id: ClockRoutineId,
    /// Display name of the device, not an [`ItemId`](crate::id::ItemId).
    pub device_id: String,
    pub name: String,
    pub duration: String,
    pub status: String,
}

impl Record for ClockRoutine {
    type Id = ClockRoutineId;

    const KIND: RecordKind = RecordKind::ClockRoutine;

    fn id(&self) -> ClockRoutineId {
        self.id
    }

    fn set_id(&mut self, id: ClockRoutineId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), InvHubError> {
        require_name(&self.name)
    }
}

impl DeviceBound for ClockRoutine {
    fn device_names(&self) -> Vec<&str> {
        vec![self.device_id.as_str()]
    }
}
