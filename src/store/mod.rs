pub mod airtable;
pub mod filter;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use filter::Filter;

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn get_bool(&self, column: &str) -> bool {
        matches!(self.get(column), Some(Value::Bool(true)))
    }

    pub fn get_first_link(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            Value::Array(items) => items.first().and_then(|v| v.as_str()).map(String::from),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordUpdate {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<Filter>,
    pub max_records: Option<usize>,
    pub sort: Vec<Sort>,
}

impl Query {
    pub fn filtered(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    pub fn max_records(mut self, n: usize) -> Self {
        self.max_records = Some(n);
        self
    }

    pub fn sort_desc(mut self, field: &str) -> Self {
        self.sort.push(Sort {
            field: field.to_string(),
            direction: SortDirection::Desc,
        });
        self
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> anyhow::Result<Vec<Record>>;

    async fn create(&self, table: &str, rows: Vec<Fields>) -> anyhow::Result<Vec<Record>>;

    async fn update(&self, table: &str, rows: Vec<RecordUpdate>) -> anyhow::Result<Vec<Record>>;

    async fn destroy(&self, table: &str, ids: Vec<String>) -> anyhow::Result<Vec<String>>;
}
