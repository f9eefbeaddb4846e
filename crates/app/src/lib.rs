//! # invhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Repository<T>` — CRUD for any [`Record`](invhub_domain::record::Record)
//!   - `Storage` — groups the five repositories a backend provides
//!   - `ChangePublisher` / `ChangeFeed` — announce and observe writes
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RecordService` — validate, persist, notify, watch
//!   - `InventoryService` — stock handling and per-item routine overview
//! - Provide **in-process infrastructure** (change bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `invhub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod change_bus;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod ports;
pub mod services;
