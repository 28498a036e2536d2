use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;

use crate::errors::AppError;
use crate::services::directory;
use crate::services::gateway::{self, GatewayRequest, GatewayResponse};
use crate::state::AppState;

fn check_auth(headers: &HeaderMap) -> Result<(), AppError> {
    let present = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.trim().is_empty());
    if !present {
        return Err(AppError::validation("No authorization header"));
    }
    Ok(())
}

// OPTIONS /babysitters
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

// POST /babysitters
pub async fn gateway(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GatewayResponse>, AppError> {
    let result = async {
        check_auth(&headers)?;
        let request: GatewayRequest = super::parse_json(&body)?;
        tracing::info!(action = ?request.action, "processing gateway request");
        gateway::handle(&state, request).await
    }
    .await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "error processing gateway request");
    }
    result.map(Json)
}

// POST /api/babysitters/:id/soft-delete
pub async fn soft_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let babysitter = directory::soft_delete_babysitter(&state, &id).await?;
    Ok(Json(serde_json::json!({ "record": babysitter })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_check_auth() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            check_auth(&headers).unwrap_err().to_string(),
            "No authorization header"
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(" "));
        assert!(check_auth(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer anon"));
        assert!(check_auth(&headers).is_ok());
    }
}
