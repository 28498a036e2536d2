use serde::Serialize;

use crate::models::{RequestAction, RequestStatus};

pub const DELETED_MARKER: &str = "(deleted)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Affirmative,
    Negative,
    PositivePending,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    Check,
    Cross,
}

pub fn status_tone(status: RequestStatus) -> Tone {
    match status {
        RequestStatus::ParentConfirmed => Tone::Affirmative,
        RequestStatus::ParentCancelled | RequestStatus::Declined => Tone::Negative,
        RequestStatus::Available => Tone::PositivePending,
        RequestStatus::Created => Tone::Pending,
    }
}

pub fn status_icon(status: RequestStatus) -> Option<StatusIcon> {
    match status {
        RequestStatus::ParentConfirmed => Some(StatusIcon::Check),
        RequestStatus::ParentCancelled => Some(StatusIcon::Cross),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    pub request_id: String,
    pub id: String,
    pub name: String,
    pub action: RequestAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemView {
    pub id: String,
    pub request_id: String,
    pub name: String,
    pub display_name: String,
    pub deleted: bool,
    pub badge: Badge,
    pub icon: Option<StatusIcon>,
    pub controls: Vec<RequestAction>,
}

// Where a control click goes. `Remote` rows show controls but leave the
// click to the client, which posts it to the request action route.
#[derive(Clone, Copy)]
enum ActionTarget<'a> {
    None,
    Callback(&'a (dyn Fn(ActionEvent) + 'a)),
    Remote,
}

pub struct ListItem<'a> {
    pub id: String,
    pub request_id: String,
    pub name: String,
    pub status: RequestStatus,
    pub deleted: bool,
    target: ActionTarget<'a>,
}

impl<'a> ListItem<'a> {
    pub fn new(
        id: impl Into<String>,
        request_id: impl Into<String>,
        name: impl Into<String>,
        status: RequestStatus,
    ) -> Self {
        Self {
            id: id.into(),
            request_id: request_id.into(),
            name: name.into(),
            status,
            deleted: false,
            target: ActionTarget::None,
        }
    }

    pub fn deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    pub fn on_action(mut self, handler: &'a (dyn Fn(ActionEvent) + 'a)) -> Self {
        self.target = ActionTarget::Callback(handler);
        self
    }

    pub fn remote_actions(mut self) -> Self {
        self.target = ActionTarget::Remote;
        self
    }

    pub fn is_actionable(&self) -> bool {
        self.status.is_actionable() && !matches!(self.target, ActionTarget::None)
    }

    pub fn render(&self) -> ListItemView {
        let display_name = if self.deleted {
            format!("{} {DELETED_MARKER}", self.name)
        } else {
            self.name.clone()
        };

        let controls = if self.is_actionable() {
            vec![RequestAction::Confirm, RequestAction::Cancel]
        } else {
            Vec::new()
        };

        ListItemView {
            id: self.id.clone(),
            request_id: self.request_id.clone(),
            name: self.name.clone(),
            display_name,
            deleted: self.deleted,
            badge: Badge {
                label: self.status.as_str(),
                tone: status_tone(self.status),
            },
            icon: status_icon(self.status),
            controls,
        }
    }

    pub fn trigger(&self, action: RequestAction) -> bool {
        let ActionTarget::Callback(handler) = self.target else {
            return false;
        };
        if !self.status.is_actionable() {
            return false;
        }
        handler(ActionEvent {
            request_id: self.request_id.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            action,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    const ALL: [RequestStatus; 5] = [
        RequestStatus::Created,
        RequestStatus::Available,
        RequestStatus::ParentConfirmed,
        RequestStatus::ParentCancelled,
        RequestStatus::Declined,
    ];

    #[test]
    fn test_tones() {
        assert_eq!(status_tone(RequestStatus::ParentConfirmed), Tone::Affirmative);
        assert_eq!(status_tone(RequestStatus::ParentCancelled), Tone::Negative);
        assert_eq!(status_tone(RequestStatus::Available), Tone::PositivePending);
        assert_eq!(status_tone(RequestStatus::Declined), Tone::Negative);
        assert_eq!(status_tone(RequestStatus::Created), Tone::Pending);
        assert_eq!(status_tone(RequestStatus::parse("something else")), Tone::Pending);
    }

    #[test]
    fn test_icons() {
        assert_eq!(status_icon(RequestStatus::ParentConfirmed), Some(StatusIcon::Check));
        assert_eq!(status_icon(RequestStatus::ParentCancelled), Some(StatusIcon::Cross));
        assert_eq!(status_icon(RequestStatus::Available), None);
        assert_eq!(status_icon(RequestStatus::Declined), None);
        assert_eq!(status_icon(RequestStatus::Created), None);
    }

    #[test]
    fn test_decided_statuses_never_show_controls() {
        let fired = Cell::new(false);
        let handler = |_: ActionEvent| fired.set(true);
        for status in [RequestStatus::ParentConfirmed, RequestStatus::ParentCancelled] {
            let with = ListItem::new("b1", "r1", "Jane", status).on_action(&handler);
            assert!(with.render().controls.is_empty());
            assert!(!with.trigger(RequestAction::Confirm));
            assert!(!with.trigger(RequestAction::Cancel));

            let without = ListItem::new("b1", "r1", "Jane", status);
            assert!(without.render().controls.is_empty());
        }
        assert!(!fired.get());
    }

    #[test]
    fn test_pending_statuses_need_a_handler() {
        for status in [RequestStatus::Created, RequestStatus::Available, RequestStatus::Declined] {
            let item = ListItem::new("b1", "r1", "Jane", status);
            assert!(item.render().controls.is_empty());
            assert!(!item.trigger(RequestAction::Confirm));
        }
    }

    #[test]
    fn test_controls_fire_with_literal_action() {
        for status in [RequestStatus::Created, RequestStatus::Available, RequestStatus::Declined] {
            let calls = RefCell::new(Vec::new());
            let handler = |e: ActionEvent| calls.borrow_mut().push(e);
            let item = ListItem::new("b1", "r1", "Jane", status).on_action(&handler);

            assert_eq!(
                item.render().controls,
                vec![RequestAction::Confirm, RequestAction::Cancel]
            );
            assert!(item.trigger(RequestAction::Confirm));
            assert!(item.trigger(RequestAction::Cancel));

            let calls = calls.into_inner();
            assert_eq!(calls.len(), 2);
            assert_eq!(calls[0].action.as_str(), "confirm");
            assert_eq!(calls[1].action.as_str(), "cancel");
            for call in &calls {
                assert_eq!(call.request_id, "r1");
                assert_eq!(call.id, "b1");
                assert_eq!(call.name, "Jane");
            }
        }
    }

    #[test]
    fn test_remote_actions_show_controls_without_firing() {
        let item = ListItem::new("b1", "r1", "Jane", RequestStatus::Available).remote_actions();
        assert!(item.is_actionable());
        assert_eq!(
            item.render().controls,
            vec![RequestAction::Confirm, RequestAction::Cancel]
        );
        assert!(!item.trigger(RequestAction::Confirm));

        let decided = ListItem::new("b1", "r1", "Jane", RequestStatus::ParentConfirmed).remote_actions();
        assert!(decided.render().controls.is_empty());
    }

    #[test]
    fn test_status_case_does_not_change_rendering() {
        let handler = |_: ActionEvent| {};
        let views: Vec<_> = ["Parent Confirmed", "PARENT CONFIRMED", "parent confirmed"]
            .iter()
            .map(|s| {
                ListItem::new("b1", "r1", "Jane", RequestStatus::parse(s))
                    .on_action(&handler)
                    .render()
            })
            .collect();
        assert_eq!(views[0], views[1]);
        assert_eq!(views[1], views[2]);
        assert_eq!(views[0].badge.tone, Tone::Affirmative);
        assert_eq!(views[0].icon, Some(StatusIcon::Check));
        assert!(views[0].controls.is_empty());
    }

    #[test]
    fn test_deleted_marker_only_changes_name() {
        let handler = |_: ActionEvent| {};
        for status in ALL {
            let live = ListItem::new("b1", "r1", "Jane", status).on_action(&handler).render();
            let gone = ListItem::new("b1", "r1", "Jane", status)
                .deleted(true)
                .on_action(&handler)
                .render();
            assert_eq!(gone.display_name, "Jane (deleted)");
            assert_eq!(live.display_name, "Jane");
            assert_eq!(gone.badge, live.badge);
            assert_eq!(gone.icon, live.icon);
            assert_eq!(gone.controls, live.controls);
        }
    }

    #[test]
    fn test_badge_label_is_canonical() {
        let view = ListItem::new("b1", "r1", "Jane", RequestStatus::parse("parent cancelled")).render();
        assert_eq!(view.badge.label, "Parent Cancelled");
        assert_eq!(view.icon, Some(StatusIcon::Cross));
    }

    #[test]
    fn test_view_serializes_for_clients() {
        let view = ListItem::new("b1", "r1", "Jane", RequestStatus::Available).render();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["requestId"], "r1");
        assert_eq!(json["displayName"], "Jane");
        assert_eq!(json["badge"]["tone"], "positive_pending");
        assert_eq!(json["badge"]["label"], "Available");
        assert!(json["icon"].is_null());
    }
}
