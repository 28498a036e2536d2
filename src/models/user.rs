use serde::{Deserialize, Serialize};

use crate::store::{Fields, Record};

pub const COL_MOBILE: &str = "Mobile";
pub const COL_FIRST_NAME: &str = "First Name";
pub const COL_LAST_NAME: &str = "Last Name";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub mobile: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            mobile: record.get_str(COL_MOBILE).unwrap_or_default(),
            first_name: record.get_str(COL_FIRST_NAME).unwrap_or_default(),
            last_name: record.get_str(COL_LAST_NAME).unwrap_or_default(),
        }
    }

    pub fn to_fields(first_name: &str, last_name: &str, mobile: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert(COL_FIRST_NAME.into(), first_name.into());
        fields.insert(COL_LAST_NAME.into(), last_name.into());
        fields.insert(COL_MOBILE.into(), mobile.into());
        fields
    }
}
