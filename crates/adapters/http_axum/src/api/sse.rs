//! Server-Sent Events (SSE) streams of record snapshots.
//!
//! Each stream sends the current state as soon as the client connects,
//! then a new `snapshot` frame after every write to the watched family.
//! Streams end when the server shuts down so that draining completes.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use serde::Serialize;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use invhub_app::ports::Storage;
use invhub_app::services::inventory::Resource;
use invhub_domain::error::InvHubError;

use super::records::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Notifier};

fn frame<V: Serialize>(result: Result<V, InvHubError>) -> Option<Result<Event, Infallible>> {
    match result {
        Ok(value) => match Event::default().event("snapshot").json_data(&value) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize snapshot for SSE stream");
                None
            }
        },
        Err(err) => {
            tracing::error!(error = %err, "failed to read snapshot for SSE stream");
            Some(Ok(Event::default().event("error").data("failed to read records")))
        }
    }
}

/// Forward `events` until `shutdown` turns `true`.
fn until_shutdown<E>(
    events: E,
    shutdown: watch::Receiver<bool>,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static
where
    E: Stream<Item = Result<Event, Infallible>> + Send + 'static,
{
    let stop = WatchStream::new(shutdown)
        .filter(|stopping| *stopping)
        .map(|_| None);
    events
        .map(Some)
        .merge(stop)
        .take_while(Option::is_some)
        .filter_map(|event| event)
}

/// `GET /api/<family>/stream` — live list of every record in the family.
pub async fn watch_all<S, P, T>(
    State(state): State<AppState<S, P>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P> + Serialize,
{
    let snapshots = state.inventory.service::<T>().watch_all().filter_map(frame);
    Sse::new(until_shutdown(snapshots, state.shutdown)).keep_alive(KeepAlive::default())
}

/// `GET /api/<family>/{id}/stream` — live view of one record; `null` once
/// it has been deleted.
pub async fn watch<S, P, T>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P> + Serialize,
{
    let id = parse_id::<T>(&id)?;
    let snapshots = state.inventory.service::<T>().watch(id).filter_map(frame);
    Ok(Sse::new(until_shutdown(snapshots, state.shutdown)).keep_alive(KeepAlive::default()))
}
