use serde::{Deserialize, Serialize};

use crate::error::InvHubError;
use crate::id::{ItemId, MixRoutineId};
use crate::record::{Record, RecordKind, require_name};
use crate::schedule::span_between;

use super::DeviceBound;

/// A multi-device routine that also carries a time window.
///
/// After device `device_id` has been switched to `status`, device
/// `target_name` goes to `target_status` between `start_time` and `end_time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixRoutine {
    pub id: MixRoutineId,
    pub device_id: String,
    pub name: String,
    pub time: String,
    pub status: String,
    pub target_id: Option<ItemId>,
    pub target_name: String,
    pub target_status: String,
    pub end_time: String,
    pub start_time: String,
    /// Length of the window in seconds, as text.
    pub duration: String,
}

impl Record for MixRoutine {
    type Id = MixRoutineId;

    const KIND: RecordKind = RecordKind::MixRoutine;

    fn id(&self) -> MixRoutineId {
        self.id
    }

    fn set_id(&mut self, id: MixRoutineId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), InvHubError> {
        require_name(&self.name)
    }

    fn normalize(&mut self) {
        if let Ok(span) = span_between(&self.start_time, &self.end_time) {
            self.duration = span.as_seconds().to_string();
        }
    }
}

impl DeviceBound for MixRoutine {
    fn device_names(&self) -> Vec<&str> {
        vec![self.device_id.as_str(), self.target_name.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_store_window_length_in_seconds() {
        let mut routine = MixRoutine {
            name: "Porch".to_string(),
            start_time: "23:30".to_string(),
            end_time: "0:15".to_string(),
            ..Default::default()
        };
        routine.normalize();
        assert_eq!(routine.duration, "2700");
    }

    #[test]
    fn should_leave_duration_untouched_without_times() {
        let mut routine = MixRoutine {
            name: "Porch".to_string(),
            duration: "90".to_string(),
            ..Default::default()
        };
        routine.normalize();
        assert_eq!(routine.duration, "90");
    }
}
