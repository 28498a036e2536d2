use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::babysitter::{COL_PARENT_MOBILE, KEY_FIRST_NAME, KEY_ID, KEY_MOBILE, KEY_PARENT_MOBILE};
use crate::models::{Babysitter, BabysitterInput};
use crate::services::single;
use crate::state::AppState;
use crate::store::{Filter, Query, RecordUpdate};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedRecord {
    pub id: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    Fetched { babysitters: Vec<Babysitter> },
    Saved { record: Babysitter },
    Deleted { record: DeletedRecord },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayAction {
    Fetch,
    Create,
    Update,
    Delete,
}

impl GatewayAction {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "fetch" => Ok(GatewayAction::Fetch),
            "create" => Ok(GatewayAction::Create),
            "update" => Ok(GatewayAction::Update),
            "delete" => Ok(GatewayAction::Delete),
            other => Err(AppError::UnsupportedAction(other.to_string())),
        }
    }
}

pub async fn handle(state: &AppState, request: GatewayRequest) -> Result<GatewayResponse, AppError> {
    let action = GatewayAction::parse(request.action.as_deref().unwrap_or_default())?;
    let input = BabysitterInput::from_data(&request.data);
    let table = state.config.tables.babysitters.as_str();

    match action {
        GatewayAction::Fetch => {
            let parent_mobile = input.present(KEY_PARENT_MOBILE).ok_or_else(|| {
                AppError::validation("Parent mobile number is required for fetch action")
            })?;

            tracing::info!(parent_mobile = %parent_mobile, "fetching babysitters");
            let query = Query::filtered(Filter::eq(COL_PARENT_MOBILE, &parent_mobile));
            let records = state.store.select(table, &query).await?;
            tracing::info!(count = records.len(), "found babysitters");

            Ok(GatewayResponse::Fetched {
                babysitters: records.iter().map(Babysitter::from_record).collect(),
            })
        }
        GatewayAction::Create => {
            let mobile = match (
                input.present(KEY_FIRST_NAME),
                input.present(KEY_MOBILE),
                input.present(KEY_PARENT_MOBILE),
            ) {
                (Some(_), Some(mobile), Some(_)) => mobile,
                _ => {
                    return Err(AppError::validation(
                        "First name, mobile number, and parent mobile are required for create action",
                    ))
                }
            };

            tracing::info!(mobile = %mobile, "creating babysitter");
            let records = state.store.create(table, vec![input.create_fields()]).await?;
            let record = single(records, "babysitter create")?;
            tracing::info!(id = %record.id, "created babysitter");

            Ok(GatewayResponse::Saved {
                record: Babysitter::from_record(&record),
            })
        }
        GatewayAction::Update => {
            let id = match (
                input.present(KEY_ID),
                input.present(KEY_FIRST_NAME),
                input.present(KEY_MOBILE),
            ) {
                (Some(id), Some(_), Some(_)) => id,
                _ => {
                    return Err(AppError::validation(
                        "ID, first name, and mobile number are required for update action",
                    ))
                }
            };

            tracing::info!(id = %id, "updating babysitter");
            let update = RecordUpdate {
                id,
                fields: input.update_fields(),
            };
            let records = state.store.update(table, vec![update]).await?;
            let record = single(records, "babysitter update")?;

            Ok(GatewayResponse::Saved {
                record: Babysitter::from_record(&record),
            })
        }
        GatewayAction::Delete => {
            let id = input
                .present(KEY_ID)
                .ok_or_else(|| AppError::validation("ID is required for delete action"))?;

            tracing::info!(id = %id, "deleting babysitter");
            let deleted = state.store.destroy(table, vec![id.clone()]).await?;
            let id = deleted
                .into_iter()
                .next()
                .ok_or_else(|| AppError::Store(anyhow::anyhow!("record store did not delete {id}")))?;

            Ok(GatewayResponse::Deleted {
                record: DeletedRecord { id, deleted: true },
            })
        }
    }
}
