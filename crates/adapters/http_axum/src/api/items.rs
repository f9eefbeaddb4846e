//! Item-specific JSON handlers.

use axum::Json;
use axum::extract::{Path, State};

use invhub_app::ports::Storage;
use invhub_app::services::inventory::ItemOverview;
use invhub_domain::item::Item;

use super::records::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Notifier};

/// `POST /api/items/{id}/sell` — take one unit out of stock.
pub async fn sell<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError>
where
    S: Storage,
    P: Notifier,
{
    let id = parse_id::<Item>(&id)?;
    let item = state.inventory.sell_one(id).await?;
    Ok(Json(item))
}

/// `GET /api/items/{id}/overview` — item, stock flag and its routines.
pub async fn overview<S, P>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> Result<Json<ItemOverview>, ApiError>
where
    S: Storage,
    P: Notifier,
{
    let id = parse_id::<Item>(&id)?;
    let overview = state.inventory.overview(id).await?;
    Ok(Json(overview))
}
