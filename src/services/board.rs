use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Babysitter;
use crate::services::directory;
use crate::state::AppState;
use crate::views::{ListItem, ListItemView};

pub const UNKNOWN_BABYSITTER: &str = "Unknown babysitter";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRow {
    pub date: NaiveDate,
    pub time_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(flatten)]
    pub item: ListItemView,
}

pub async fn request_board(state: &AppState, parent_mobile: &str) -> Vec<BoardRow> {
    let requests = directory::fetch_requests(state, parent_mobile).await;
    let babysitters: HashMap<String, Babysitter> = directory::fetch_babysitters(state, parent_mobile)
        .await
        .into_iter()
        .map(|b| (b.id.clone(), b))
        .collect();

    requests
        .into_iter()
        .map(|request| {
            let (name, deleted) = match babysitters.get(&request.babysitter_id) {
                Some(b) => (b.display_name(), b.deleted),
                None => (UNKNOWN_BABYSITTER.to_string(), true),
            };
            let item = ListItem::new(&request.babysitter_id, &request.id, name, request.status)
                .deleted(deleted)
                .remote_actions();
            let item = item.render();
            let action_url = (!item.controls.is_empty())
                .then(|| format!("/api/requests/{}/action", request.id));
            BoardRow {
                date: request.date,
                time_range: request.time_range,
                action_url,
                item,
            }
        })
        .collect()
}
