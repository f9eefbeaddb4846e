//! # invhub-domain
//!
//! Pure domain model for the invhub inventory system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Items** (tracked devices with a price and a stock quantity)
//! - Define **Routines** (timer, clock, multi-device and mixed on/off plans
//!   attached to items by device name)
//! - Define **Changes** (notifications emitted after every write)
//! - Clock-time parsing and elapsed-time arithmetic used by routines
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod change;
pub mod item;
pub mod record;
pub mod routine;
pub mod schedule;
