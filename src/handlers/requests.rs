use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{RequestAction, TimeRange};
use crate::services::{board, directory};
use crate::state::AppState;

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(format!("{name} is required")))
}

// GET /api/requests?parentMobile=
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardQuery {
    pub parent_mobile: Option<String>,
}

pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let parent_mobile = required(&query.parent_mobile, "parentMobile")?;
    let rows = board::request_board(&state, parent_mobile).await;
    Ok(Json(serde_json::json!({ "requests": rows })))
}

// POST /api/requests
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequestBody {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub babysitter_id: Option<String>,
    pub parent_mobile: Option<String>,
}

pub async fn create_request(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let body: NewRequestBody = super::parse_json(&body)?;

    let date = required(&body.date, "date")?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("invalid date '{date}', expected YYYY-MM-DD")))?;
    let time_range = TimeRange::parse(
        required(&body.start_time, "startTime")?,
        required(&body.end_time, "endTime")?,
    )
    .map_err(AppError::Validation)?;
    let babysitter_id = required(&body.babysitter_id, "babysitterId")?;
    let parent_mobile = required(&body.parent_mobile, "parentMobile")?;

    let request =
        directory::create_request(&state, date, &time_range, babysitter_id, parent_mobile).await?;
    Ok(Json(serde_json::json!({ "record": request })))
}

// POST /api/requests/:id/action
#[derive(Deserialize)]
pub struct ActionBody {
    pub action: RequestAction,
}

pub async fn request_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let body: ActionBody = super::parse_json(&body)?;
    let request = directory::apply_request_action(&state, &id, body.action).await?;
    Ok(Json(serde_json::json!({ "record": request })))
}
