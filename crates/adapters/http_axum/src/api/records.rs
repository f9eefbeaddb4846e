//! JSON REST handlers shared by items and every routine family.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use invhub_app::ports::Storage;
use invhub_app::services::inventory::Resource;
use invhub_domain::error::ValidationError;
use invhub_domain::record::Record;

use crate::error::ApiError;
use crate::state::{AppState, Notifier};

/// Parse a path segment into the id type of `T`.
pub(crate) fn parse_id<T: Record>(raw: &str) -> Result<T::Id, ApiError> {
    raw.parse::<T::Id>()
        .map_err(|_| ValidationError::MalformedId(raw.to_string()).into())
}

/// `GET /api/<family>`
pub async fn list<S, P, T>(
    State(state): State<AppState<S, P>>,
) -> Result<Json<Vec<T>>, ApiError>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P> + Serialize,
{
    let records = state.inventory.service::<T>().list().await?;
    Ok(Json(records))
}

/// `GET /api/<family>/{id}`
pub async fn get<S, P, T>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P> + Serialize,
{
    let id = parse_id::<T>(&id)?;
    let record = state.inventory.service::<T>().get(id).await?;
    Ok(Json(record))
}

/// `POST /api/<family>` — the server assigns the id.
pub async fn create<S, P, T>(
    State(state): State<AppState<S, P>>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P> + Serialize + DeserializeOwned,
{
    let Json(record) = payload?;
    let created = state.inventory.service::<T>().create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/<family>/{id}` — the path id wins over any id in the body.
pub async fn update<S, P, T>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, ApiError>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P> + Serialize + DeserializeOwned,
{
    let id = parse_id::<T>(&id)?;
    let Json(mut record) = payload?;
    record.set_id(id);
    let updated = state.inventory.service::<T>().update(record).await?;
    Ok(Json(updated))
}

/// `DELETE /api/<family>/{id}`
pub async fn delete<S, P, T>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: Storage,
    P: Notifier,
    T: Resource<S, P>,
{
    let id = parse_id::<T>(&id)?;
    state.inventory.service::<T>().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
