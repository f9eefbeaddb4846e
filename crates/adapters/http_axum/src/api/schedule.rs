//! Elapsed-time helper used by routine entry forms.
//!
//! Forms call this while the user is still typing, so unparsable times are
//! not an error: the answer carries the `"Invalid time format"` text and no
//! numbers.

use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use serde::{Deserialize, Serialize};

use invhub_domain::schedule::{Span, describe_between, span_between};

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct DurationQuery {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct DurationResponse {
    pub start: String,
    pub end: String,
    pub valid: bool,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u64>,
    pub description: String,
}

/// `GET /api/schedule/duration?start=HH:mm&end=HH:mm`
pub async fn duration(
    query: Result<Query<DurationQuery>, QueryRejection>,
) -> Result<Json<DurationResponse>, ApiError> {
    let Query(query) = query?;
    let span = span_between(&query.start, &query.end).ok();

    Ok(Json(DurationResponse {
        description: describe_between(&query.start, &query.end),
        valid: span.is_some(),
        hours: span.map(Span::hours),
        minutes: span.map(Span::minutes),
        seconds: span.map(Span::as_seconds),
        start: query.start,
        end: query.end,
    }))
}
