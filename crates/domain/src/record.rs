//! The shape every persisted record shares.
//!
//! Items and the four routine families are stored, listed, watched and
//! deleted the same way. [`Record`] captures what that generic handling
//! needs to know about a type.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InvHubError, ValidationError};

/// The families of persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Item,
    TimerRoutine,
    ClockRoutine,
    MultiRoutine,
    MixRoutine,
}

impl RecordKind {
    /// Human-facing label, used in not-found messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Item => "Item",
            Self::TimerRoutine => "Timer routine",
            Self::ClockRoutine => "Clock routine",
            Self::MultiRoutine => "Multi routine",
            Self::MixRoutine => "Mix routine",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Item => "item",
            Self::TimerRoutine => "timer_routine",
            Self::ClockRoutine => "clock_routine",
            Self::MultiRoutine => "multi_routine",
            Self::MixRoutine => "mix_routine",
        };
        f.write_str(name)
    }
}

/// A persisted record with a typed identity.
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type of this record. `Default` yields a fresh identifier.
    type Id: Copy
        + Default
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + FromStr
        + Send
        + Sync
        + 'static;

    /// Which family this record belongs to.
    const KIND: RecordKind;

    fn id(&self) -> Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`InvHubError::Validation`] when an invariant does not hold.
    fn validate(&self) -> Result<(), InvHubError>;

    /// Recompute derived fields before the record is persisted.
    fn normalize(&mut self) {}
}

/// Reject names that are empty or whitespace only.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] for a blank name.
pub fn require_name(name: &str) -> Result<(), InvHubError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    Ok(())
}
