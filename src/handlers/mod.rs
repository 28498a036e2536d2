pub mod babysitters;
pub mod health;
pub mod requests;
pub mod users;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::errors::AppError;

pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::validation(format!("invalid request body: {e}")))
}
