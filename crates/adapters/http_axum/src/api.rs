//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod items;
#[allow(clippy::missing_errors_doc)]
pub mod records;
#[allow(clippy::missing_errors_doc)]
pub mod schedule;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};
use serde::Serialize;
use serde::de::DeserializeOwned;

use invhub_app::ports::Storage;
use invhub_app::services::inventory::Resource;
use invhub_domain::item::Item;
use invhub_domain::routine::{ClockRoutine, MixRoutine, MultiRoutine, TimerRoutine};

use crate::state::{AppState, Notifier};

/// Build the `/api` sub-router.
pub fn routes<S, P>() -> Router<AppState<S, P>>
where
    S: Storage,
    P: Notifier,
{
    let items = record_routes::<S, P, Item>()
        .route("/{id}/sell", post(items::sell::<S, P>))
        .route("/{id}/overview", get(items::overview::<S, P>));

    Router::new()
        .nest("/items", items)
        .nest("/routines/timer", record_routes::<S, P, TimerRoutine>())
        .nest("/routines/clock", record_routes::<S, P, ClockRoutine>())
        .nest("/routines/multi", record_routes::<S, P, MultiRoutine>())
        .nest("/routines/mix", record_routes::<S, P, MixRoutine>())
        .route("/schedule/duration", get(schedule::duration))
}

/// CRUD and stream routes shared by every record family.
fn record_routes<S, P, T>() -> Router<AppState<S, P>>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P> + Serialize + DeserializeOwned,
{
    Router::new()
        .route(
            "/",
            get(records::list::<S, P, T>).post(records::create::<S, P, T>),
        )
        .route("/stream", get(sse::watch_all::<S, P, T>))
        .route(
            "/{id}",
            get(records::get::<S, P, T>)
                .put(records::update::<S, P, T>)
                .delete(records::delete::<S, P, T>),
        )
        .route("/{id}/stream", get(sse::watch::<S, P, T>))
}
