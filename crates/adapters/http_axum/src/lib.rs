//! # invhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for items and the four routine families
//!   (`/api/items`, `/api/routines/timer`, `/api/routines/clock`, …)
//! - Serve **Server-Sent Event streams** that push a fresh snapshot of a
//!   record list or a single record after every write
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `invhub-app` (for port traits and services) and `invhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
