use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use super::{Fields, Query, Record, RecordStore, RecordUpdate, SortDirection};

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, table: &str) -> usize {
        let tables = self.tables.lock().unwrap();
        tables.get(table).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

fn new_record_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("rec{}", &raw[..14])
}

fn sort_key(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> anyhow::Result<Vec<Record>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Record> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| query.filter.as_ref().map_or(true, |f| f.matches(&r.fields)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if !query.sort.is_empty() {
            rows.sort_by(|a, b| {
                for sort in &query.sort {
                    let ord = sort_key(a.fields.get(&sort.field))
                        .cmp(&sort_key(b.fields.get(&sort.field)));
                    let ord = match sort.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }

        if let Some(n) = query.max_records {
            rows.truncate(n);
        }

        Ok(rows)
    }

    async fn create(&self, table: &str, rows: Vec<Fields>) -> anyhow::Result<Vec<Record>> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let created: Vec<Record> = rows
            .into_iter()
            .map(|fields| Record {
                id: new_record_id(),
                created_time: Some(now.clone()),
                fields,
            })
            .collect();

        let mut tables = self.tables.lock().unwrap();
        tables
            .entry(table.to_string())
            .or_default()
            .extend(created.iter().cloned());
        Ok(created)
    }

    async fn update(&self, table: &str, rows: Vec<RecordUpdate>) -> anyhow::Result<Vec<Record>> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables.entry(table.to_string()).or_default();

        // Validate the whole batch before touching anything.
        if let Some(missing) = rows.iter().find(|u| !stored.iter().any(|r| r.id == u.id)) {
            bail!("record {} not found in {table}", missing.id);
        }

        let mut updated = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(record) = stored.iter_mut().find(|r| r.id == row.id) {
                for (column, value) in row.fields {
                    if value.is_null() {
                        record.fields.remove(&column);
                    } else {
                        record.fields.insert(column, value);
                    }
                }
                updated.push(record.clone());
            }
        }
        Ok(updated)
    }

    async fn destroy(&self, table: &str, ids: Vec<String>) -> anyhow::Result<Vec<String>> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables.entry(table.to_string()).or_default();

        if let Some(missing) = ids.iter().find(|id| !stored.iter().any(|r| &r.id == *id)) {
            bail!("record {missing} not found in {table}");
        }

        stored.retain(|r| !ids.contains(&r.id));
        Ok(ids)
    }
}
