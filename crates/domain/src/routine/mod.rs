//! Routines — persisted on/off plans attached to items.
//!
//! A routine records what *should* happen to a device: switch it after a
//! period, at a clock time, in reaction to another device, or a mix of
//! these. Nothing in this system executes them.
//!
//! Routines refer to devices by their display name, not by [`ItemId`].
//! [`DeviceBound::references`] is the single place that matching happens.
//!
//! [`ItemId`]: crate::id::ItemId

mod clock;
mod mix;
mod multi;
mod timer;

pub use clock::ClockRoutine;
pub use mix::MixRoutine;
pub use multi::MultiRoutine;
pub use timer::TimerRoutine;

/// A routine that names the devices it acts on.
pub trait DeviceBound {
    /// Device names referenced by this routine, in declaration order.
    fn device_names(&self) -> Vec<&str>;

    /// Whether the device called `name` takes part in this routine.
    fn references(&self, name: &str) -> bool {
        self.device_names().iter().any(|candidate| *candidate == name)
    }
}
