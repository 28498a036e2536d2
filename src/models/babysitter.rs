use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Fields, Record};

pub const COL_FIRST_NAME: &str = "First Name";
pub const COL_LAST_NAME: &str = "Last Name";
pub const COL_MOBILE: &str = "Mobile";
pub const COL_PARENT_MOBILE: &str = "Parent Owner Mobile";
pub const COL_AGE: &str = "Age";
pub const COL_GRADE: &str = "Grade";
pub const COL_RATE: &str = "Rate";
pub const COL_SPECIALTIES: &str = "Specialties";
pub const COL_NOTES: &str = "Notes";
pub const COL_EMAIL: &str = "Email";
pub const COL_BABYSITTER_ID: &str = "Babysitter ID";
pub const COL_DELETED: &str = "Deleted";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Babysitter {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub babysitter_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl Babysitter {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            first_name: record.get_str(COL_FIRST_NAME),
            last_name: record.get_str(COL_LAST_NAME),
            mobile: record.get_str(COL_MOBILE),
            email: record.get_str(COL_EMAIL),
            age: record.get(COL_AGE).cloned(),
            grade: record.get(COL_GRADE).cloned(),
            rate: record.get(COL_RATE).cloned(),
            specialties: record.get(COL_SPECIALTIES).cloned(),
            notes: record.get_str(COL_NOTES),
            babysitter_id: record.get(COL_BABYSITTER_ID).cloned(),
            parent_mobile: record.get_str(COL_PARENT_MOBILE),
            deleted: record.get_bool(COL_DELETED),
        }
    }

    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => self.mobile.clone().unwrap_or_default(),
        }
    }
}

// Client payload keys. A key that is present with `null` clears the column on update.
pub const KEY_ID: &str = "id";
pub const KEY_FIRST_NAME: &str = "firstName";
pub const KEY_LAST_NAME: &str = "lastName";
pub const KEY_MOBILE: &str = "mobile";
pub const KEY_PARENT_MOBILE: &str = "parentMobile";

const PASS_THROUGH: [(&str, &str); 6] = [
    ("age", COL_AGE),
    ("grade", COL_GRADE),
    ("rate", COL_RATE),
    ("specialties", COL_SPECIALTIES),
    ("notes", COL_NOTES),
    ("email", COL_EMAIL),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BabysitterInput {
    values: Fields,
}

impl BabysitterInput {
    pub fn from_data(data: &Value) -> Self {
        Self {
            values: data.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn present(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn write_fields(&self, keep_null: bool) -> Fields {
        let mut fields = Fields::new();
        for (key, column) in [(KEY_FIRST_NAME, COL_FIRST_NAME), (KEY_MOBILE, COL_MOBILE)] {
            if let Some(v) = self.present(key) {
                fields.insert(column.to_string(), Value::String(v));
            }
        }
        let optional = std::iter::once((KEY_LAST_NAME, COL_LAST_NAME)).chain(PASS_THROUGH);
        for (key, column) in optional {
            match self.values.get(key) {
                Some(Value::Null) if !keep_null => {}
                Some(v) => {
                    fields.insert(column.to_string(), v.clone());
                }
                None => {}
            }
        }
        fields
    }

    pub fn create_fields(&self) -> Fields {
        let mut fields = self.write_fields(false);
        if let Some(parent) = self.present(KEY_PARENT_MOBILE) {
            fields.insert(COL_PARENT_MOBILE.to_string(), Value::String(parent));
        }
        fields
    }

    // The owning parent never moves on update.
    pub fn update_fields(&self) -> Fields {
        self.write_fields(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: Value) -> Record {
        Record {
            id: "recB1".to_string(),
            created_time: None,
            fields: fields.as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn test_from_record_maps_columns() {
        let rec = record(json!({
            "First Name": "Jane",
            "Last Name": "Doe",
            "Mobile": "555-1234",
            "Parent Owner Mobile": "555-0000",
            "Age": 16,
            "Grade": "11",
            "Rate": 15.5,
            "Email": "jane@example.com",
            "Babysitter ID": 7,
        }));
        let b = Babysitter::from_record(&rec);
        assert_eq!(b.id, "recB1");
        assert_eq!(b.first_name.as_deref(), Some("Jane"));
        assert_eq!(b.parent_mobile.as_deref(), Some("555-0000"));
        assert_eq!(b.age, Some(json!(16)));
        assert_eq!(b.rate, Some(json!(15.5)));
        assert_eq!(b.babysitter_id, Some(json!(7)));
        assert!(!b.deleted);
    }

    #[test]
    fn test_serializes_camel_case_and_omits_missing() {
        let b = Babysitter::from_record(&record(json!({"First Name": "Jane", "Deleted": true})));
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(v, json!({"id": "recB1", "firstName": "Jane", "deleted": true}));
    }

    #[test]
    fn test_display_name() {
        let b = Babysitter::from_record(&record(json!({"First Name": "Jane", "Last Name": "Doe"})));
        assert_eq!(b.display_name(), "Jane Doe");
        let b = Babysitter::from_record(&record(json!({"First Name": "Jane", "Last Name": ""})));
        assert_eq!(b.display_name(), "Jane");
        let b = Babysitter::from_record(&record(json!({"Mobile": "555"})));
        assert_eq!(b.display_name(), "555");
    }

    #[test]
    fn test_create_fields_only_include_supplied_values() {
        let input = BabysitterInput::from_data(&json!({
            "firstName": "Jane",
            "mobile": "555-1234",
            "parentMobile": "555-0000",
            "age": null,
            "rate": 20
        }));
        let fields = input.create_fields();
        assert_eq!(
            Value::Object(fields),
            json!({
                "First Name": "Jane",
                "Mobile": "555-1234",
                "Parent Owner Mobile": "555-0000",
                "Rate": 20
            })
        );
    }

    #[test]
    fn test_update_fields_never_move_ownership() {
        let input = BabysitterInput::from_data(&json!({
            "id": "recB1",
            "firstName": "Jane",
            "mobile": "555-1234",
            "parentMobile": "555-9999"
        }));
        let fields = input.update_fields();
        assert!(!fields.contains_key(COL_PARENT_MOBILE));
        assert_eq!(fields.get(COL_FIRST_NAME), Some(&json!("Jane")));
    }

    #[test]
    fn test_update_fields_keep_explicit_nulls() {
        let input = BabysitterInput::from_data(&json!({
            "id": "recB1",
            "firstName": "Jane",
            "mobile": "555-1234",
            "notes": null,
            "age": null,
            "specialties": ["infants", "twins"]
        }));
        assert_eq!(
            Value::Object(input.update_fields()),
            json!({
                "First Name": "Jane",
                "Mobile": "555-1234",
                "Notes": null,
                "Age": null,
                "Specialties": ["infants", "twins"]
            })
        );
    }

    #[test]
    fn test_present_accepts_text_and_numbers() {
        let input = BabysitterInput::from_data(&json!({
            "parentMobile": 5550000,
            "mobile": "  ",
            "firstName": true
        }));
        assert_eq!(input.present(KEY_PARENT_MOBILE).as_deref(), Some("5550000"));
        assert_eq!(input.present(KEY_MOBILE), None);
        assert_eq!(input.present(KEY_FIRST_NAME), None);
        assert_eq!(input.present(KEY_ID), None);
    }

    #[test]
    fn test_non_object_data_reads_as_empty() {
        let input = BabysitterInput::from_data(&json!("nope"));
        assert_eq!(input, BabysitterInput::default());
        assert!(input.create_fields().is_empty());
    }
}
