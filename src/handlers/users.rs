use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::directory;
use crate::state::AppState;

// GET /api/users/:mobile
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(mobile): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = directory::find_user_by_mobile(&state, &mobile)
        .await
        .ok_or_else(|| AppError::NotFound(format!("user {mobile}")))?;
    Ok(Json(serde_json::json!({ "user": user })))
}

// POST /api/users
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserBody {
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    pub mobile: Option<String>,
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let body: NewUserBody = super::parse_json(&body)?;
    let (Some(first_name), Some(mobile)) = (
        body.first_name.as_deref().filter(|s| !s.trim().is_empty()),
        body.mobile.as_deref().filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(AppError::validation("First name and mobile number are required"));
    };

    let user = directory::create_user(&state, first_name, &body.last_name, mobile).await?;
    Ok(Json(serde_json::json!({ "user": user })))
}
