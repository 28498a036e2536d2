use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{babysitter, request, user};
use crate::models::{Babysitter, BabysitterInput, Request, RequestAction, TimeRange, User};
use crate::services::single;
use crate::state::AppState;
use crate::store::{Fields, Filter, Query, RecordUpdate};

// ── Users ──

pub async fn find_user_by_mobile(state: &AppState, mobile: &str) -> Option<User> {
    let query = Query::filtered(Filter::eq(user::COL_MOBILE, mobile)).max_records(1);
    match state.store.select(&state.config.tables.users, &query).await {
        Ok(records) => records.first().map(User::from_record),
        Err(e) => {
            tracing::error!(error = %e, "failed to find user");
            None
        }
    }
}

pub async fn create_user(
    state: &AppState,
    first_name: &str,
    last_name: &str,
    mobile: &str,
) -> Result<User, AppError> {
    let fields = User::to_fields(first_name, last_name, mobile);
    let records = state
        .store
        .create(&state.config.tables.users, vec![fields])
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to create user"))?;
    let record = single(records, "user create")?;
    tracing::info!(id = %record.id, "created user");
    Ok(User::from_record(&record))
}

// ── Babysitters ──

pub async fn create_babysitter(
    state: &AppState,
    first_name: &str,
    last_name: Option<&str>,
    mobile: &str,
    parent_mobile: &str,
) -> Result<Babysitter, AppError> {
    let input = BabysitterInput::default()
        .set(babysitter::KEY_FIRST_NAME, first_name)
        .set(babysitter::KEY_LAST_NAME, last_name.unwrap_or_default())
        .set(babysitter::KEY_MOBILE, mobile)
        .set(babysitter::KEY_PARENT_MOBILE, parent_mobile);
    let records = state
        .store
        .create(&state.config.tables.babysitters, vec![input.create_fields()])
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to create babysitter"))?;
    let record = single(records, "babysitter create")?;
    Ok(Babysitter::from_record(&record))
}

pub async fn fetch_babysitters(state: &AppState, parent_mobile: &str) -> Vec<Babysitter> {
    let query = Query::filtered(Filter::eq(babysitter::COL_PARENT_MOBILE, parent_mobile));
    match state.store.select(&state.config.tables.babysitters, &query).await {
        Ok(records) => records.iter().map(Babysitter::from_record).collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch babysitters");
            Vec::new()
        }
    }
}

pub async fn soft_delete_babysitter(state: &AppState, id: &str) -> Result<Babysitter, AppError> {
    let mut fields = Fields::new();
    fields.insert(babysitter::COL_DELETED.to_string(), Value::Bool(true));
    let update = RecordUpdate {
        id: id.to_string(),
        fields,
    };
    let records = state
        .store
        .update(&state.config.tables.babysitters, vec![update])
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to soft-delete babysitter"))?;
    let record = single(records, "babysitter soft delete")?;
    Ok(Babysitter::from_record(&record))
}

// ── Requests ──

pub async fn create_request(
    state: &AppState,
    date: NaiveDate,
    time_range: &TimeRange,
    babysitter_id: &str,
    parent_mobile: &str,
) -> Result<Request, AppError> {
    let fields = Request::new_fields(date, time_range, babysitter_id, parent_mobile);
    let records = state
        .store
        .create(&state.config.tables.requests, vec![fields])
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to create request"))?;
    let record = single(records, "request create")?;
    tracing::info!(id = %record.id, babysitter_id, "created request");
    Request::from_record(&record)
        .ok_or_else(|| AppError::Store(anyhow::anyhow!("created request {} is incomplete", record.id)))
}

pub async fn fetch_requests(state: &AppState, parent_mobile: &str) -> Vec<Request> {
    let query = Query::filtered(Filter::eq(request::COL_PARENT_MOBILE, parent_mobile))
        .sort_desc(request::COL_DATE);
    match state.store.select(&state.config.tables.requests, &query).await {
        Ok(records) => records
            .iter()
            .filter_map(|r| {
                let parsed = Request::from_record(r);
                if parsed.is_none() {
                    tracing::warn!(id = %r.id, "skipping request without babysitter or date");
                }
                parsed
            })
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch requests");
            Vec::new()
        }
    }
}

pub async fn apply_request_action(
    state: &AppState,
    request_id: &str,
    action: RequestAction,
) -> Result<Request, AppError> {
    let status = action.target_status();
    let mut fields = Fields::new();
    fields.insert(request::COL_STATUS.to_string(), status.as_str().into());
    let update = RecordUpdate {
        id: request_id.to_string(),
        fields,
    };

    tracing::info!(request_id, action = action.as_str(), "applying request action");
    let records = state
        .store
        .update(&state.config.tables.requests, vec![update])
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to update request status"))?;
    let record = single(records, "request update")?;
    Request::from_record(&record)
        .ok_or_else(|| AppError::Store(anyhow::anyhow!("updated request {} is incomplete", record.id)))
}
