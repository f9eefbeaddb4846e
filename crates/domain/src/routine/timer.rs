use serde::{Deserialize, Serialize};

use crate::error::InvHubError;
use crate::id::TimerRoutineId;
use crate::record::{Record, RecordKind, require_name};
use crate::schedule::span_between;

use super::DeviceBound;

/// Switch to `status` between `start_time` and `end_time`.
///
/// Not tied to a particular device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerRoutine {
    pub id: TimerRoutineId,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// Display text such as `"1 hours 30 minutes"`.
    pub duration: String,
    pub status: String,
}

impl Record for TimerRoutine {
    type Id = TimerRoutineId;

    const KIND: RecordKind = RecordKind::TimerRoutine;

    fn id(&self) -> TimerRoutineId {
        self.id
    }

    fn set_id(&mut self, id: TimerRoutineId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), InvHubError> {
        require_name(&self.name)
    }

    /// Derive `duration` from the two times when both parse; otherwise keep
    /// whatever text was supplied.
    fn normalize(&mut self) {
        if let Ok(span) = span_between(&self.start_time, &self.end_time) {
            self.duration = span.describe();
        }
    }
}

impl DeviceBound for TimerRoutine {
    fn device_names(&self) -> Vec<&str> {
        Vec::new()
    }
}
