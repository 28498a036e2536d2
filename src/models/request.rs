use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::store::{Fields, Record};

pub const COL_DATE: &str = "Request Date";
pub const COL_TIME_RANGE: &str = "Time Range";
pub const COL_BABYSITTER: &str = "Babysitter";
pub const COL_PARENT_MOBILE: &str = "Parent Requestor Mobile";
pub const COL_STATUS: &str = "Status";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Created,
    Available,
    #[serde(rename = "Parent Confirmed")]
    ParentConfirmed,
    #[serde(rename = "Parent Cancelled")]
    ParentCancelled,
    Declined,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Created => "Created",
            RequestStatus::Available => "Available",
            RequestStatus::ParentConfirmed => "Parent Confirmed",
            RequestStatus::ParentCancelled => "Parent Cancelled",
            RequestStatus::Declined => "Declined",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "available" => RequestStatus::Available,
            "parent confirmed" => RequestStatus::ParentConfirmed,
            "parent cancelled" => RequestStatus::ParentCancelled,
            "declined" => RequestStatus::Declined,
            "created" => RequestStatus::Created,
            other => {
                tracing::warn!(status = other, "unrecognised request status, treating as created");
                RequestStatus::Created
            }
        }
    }

    pub fn is_actionable(&self) -> bool {
        !matches!(
            self,
            RequestStatus::ParentConfirmed | RequestStatus::ParentCancelled
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    Confirm,
    Cancel,
}

impl RequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestAction::Confirm => "confirm",
            RequestAction::Cancel => "cancel",
        }
    }

    pub fn target_status(&self) -> RequestStatus {
        match self {
            RequestAction::Confirm => RequestStatus::ParentConfirmed,
            RequestAction::Cancel => RequestStatus::ParentCancelled,
        }
    }
}

// Start and end of a sitting, stored as `"HH:MM to HH:MM"`. The end may be
// past midnight, so no ordering is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        let parse = |s: &str| {
            NaiveTime::parse_from_str(s.trim(), "%H:%M")
                .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
        };
        Ok(Self {
            start: parse(start)?,
            end: parse(end)?,
        })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    pub date: NaiveDate,
    pub time_range: String,
    pub babysitter_id: String,
    pub parent_mobile: String,
    pub status: RequestStatus,
}

impl Request {
    pub fn from_record(record: &Record) -> Option<Self> {
        let babysitter_id = record.get_first_link(COL_BABYSITTER)?;
        let date = record
            .get_str(COL_DATE)
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())?;

        Some(Self {
            id: record.id.clone(),
            date,
            time_range: record.get_str(COL_TIME_RANGE).unwrap_or_default(),
            babysitter_id,
            parent_mobile: record.get_str(COL_PARENT_MOBILE).unwrap_or_default(),
            status: record
                .get_str(COL_STATUS)
                .map(|s| RequestStatus::parse(&s))
                .unwrap_or(RequestStatus::Created),
        })
    }

    pub fn new_fields(
        date: NaiveDate,
        time_range: &TimeRange,
        babysitter_id: &str,
        parent_mobile: &str,
    ) -> Fields {
        let mut fields = Fields::new();
        fields.insert(COL_DATE.into(), date.format("%Y-%m-%d").to_string().into());
        fields.insert(COL_TIME_RANGE.into(), time_range.to_string().into());
        fields.insert(COL_BABYSITTER.into(), serde_json::json!([babysitter_id]));
        fields.insert(COL_PARENT_MOBILE.into(), parent_mobile.into());
        fields.insert(COL_STATUS.into(), RequestStatus::Created.as_str().into());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_status_parse_is_case_insensitive() {
        for s in ["Parent Confirmed", "PARENT CONFIRMED", "parent confirmed", " parent confirmed "] {
            assert_eq!(RequestStatus::parse(s), RequestStatus::ParentConfirmed);
        }
        assert_eq!(RequestStatus::parse("DECLINED"), RequestStatus::Declined);
        assert_eq!(RequestStatus::parse("available"), RequestStatus::Available);
    }

    #[test]
    fn test_status_parse_unknown_is_created() {
        assert_eq!(RequestStatus::parse("Pending Review"), RequestStatus::Created);
        assert_eq!(RequestStatus::parse(""), RequestStatus::Created);
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in [
            RequestStatus::Created,
            RequestStatus::Available,
            RequestStatus::ParentConfirmed,
            RequestStatus::ParentCancelled,
            RequestStatus::Declined,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), status);
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
    }

    #[test]
    fn test_actionable() {
        assert!(RequestStatus::Created.is_actionable());
        assert!(RequestStatus::Available.is_actionable());
        assert!(RequestStatus::Declined.is_actionable());
        assert!(!RequestStatus::ParentConfirmed.is_actionable());
        assert!(!RequestStatus::ParentCancelled.is_actionable());
    }

    #[test]
    fn test_action_targets() {
        assert_eq!(RequestAction::Confirm.target_status(), RequestStatus::ParentConfirmed);
        assert_eq!(RequestAction::Cancel.target_status(), RequestStatus::ParentCancelled);
        assert_eq!(serde_json::to_value(RequestAction::Cancel).unwrap(), json!("cancel"));
    }

    #[test]
    fn test_time_range() {
        let range = TimeRange::parse("18:00", "22:30").unwrap();
        assert_eq!(range.to_string(), "18:00 to 22:30");
        let overnight = TimeRange::parse("21:00", "01:00").unwrap();
        assert_eq!(overnight.to_string(), "21:00 to 01:00");
        assert!(TimeRange::parse("6pm", "22:00").is_err());
    }

    #[test]
    fn test_from_record() {
        let rec = Record {
            id: "recR1".to_string(),
            created_time: None,
            fields: json!({
                "Request Date": "2024-06-01",
                "Time Range": "18:00 to 22:00",
                "Babysitter": ["recB1"],
                "Parent Requestor Mobile": "555-0000",
                "Status": "available"
            })
            .as_object()
            .cloned()
            .unwrap(),
        };
        let req = Request::from_record(&rec).unwrap();
        assert_eq!(req.babysitter_id, "recB1");
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(req.status, RequestStatus::Available);
    }

    #[test]
    fn test_from_record_requires_babysitter() {
        let rec = Record {
            id: "recR1".to_string(),
            created_time: None,
            fields: json!({"Request Date": "2024-06-01"}).as_object().cloned().unwrap(),
        };
        assert!(Request::from_record(&rec).is_none());
    }

    #[test]
    fn test_new_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let range = TimeRange::parse("18:00", "22:00").unwrap();
        let fields = Request::new_fields(date, &range, "recB1", "555-0000");
        assert_eq!(
            Value::Object(fields),
            json!({
                "Request Date": "2024-06-01",
                "Time Range": "18:00 to 22:00",
                "Babysitter": ["recB1"],
                "Parent Requestor Mobile": "555-0000",
                "Status": "Created"
            })
        );
    }
}
