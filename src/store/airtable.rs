use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::fmt;

use super::{Fields, Query, Record, RecordStore, RecordUpdate};

// The REST API rejects write batches larger than this.
const MAX_BATCH: usize = 10;

pub struct AirtableClient {
    http: Client,
    base_url: Url,
    base_id: String,
    api_key: String,
}

impl fmt::Debug for AirtableClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableClient")
            .field("base_url", &self.base_url)
            .field("base_id", &self.base_id)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ListResponse {
    records: Vec<Record>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Deserialize)]
struct RecordsResponse {
    records: Vec<Record>,
}

#[derive(Deserialize)]
struct DeletedRecord {
    id: String,
    #[serde(default)]
    deleted: bool,
}

#[derive(Deserialize)]
struct DeleteResponse {
    records: Vec<DeletedRecord>,
}

impl AirtableClient {
    pub fn new(api_url: &str, base_id: String, api_key: String) -> anyhow::Result<Self> {
        let base_url = Url::parse(api_url).context("invalid Airtable API URL")?;
        let http = Client::builder()
            .user_agent("sitterbook/0.1")
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            base_id,
            api_key,
        })
    }

    pub fn table_url(&self, table: &str) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Airtable API URL cannot be a base"))?
            .pop_if_empty()
            .push(&self.base_id)
            .push(table);
        Ok(url)
    }

    pub fn list_url(&self, table: &str, query: &Query, offset: Option<&str>) -> anyhow::Result<Url> {
        let mut url = self.table_url(table)?;
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(filter) = &query.filter {
            params.push(("filterByFormula".to_string(), filter.to_formula()));
        }
        if let Some(n) = query.max_records {
            params.push(("maxRecords".to_string(), n.to_string()));
        }
        for (i, sort) in query.sort.iter().enumerate() {
            params.push((format!("sort[{i}][field]"), sort.field.clone()));
            params.push((
                format!("sort[{i}][direction]"),
                sort.direction.as_str().to_string(),
            ));
        }
        if let Some(offset) = offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> anyhow::Result<T> {
        let res = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("failed to reach Airtable ({what})"))?;

        let status = res.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = res.text().await.unwrap_or_default();
            bail!("Airtable rate limit hit ({what}): {body}");
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            bail!("Airtable error {status} ({what}): {}", error_message(&body));
        }

        res.json()
            .await
            .with_context(|| format!("invalid Airtable response ({what})"))
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v["error"]["message"]
                .as_str()
                .or_else(|| v["error"].as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn select(&self, table: &str, query: &Query) -> anyhow::Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let url = self.list_url(table, query, offset.as_deref())?;
            tracing::debug!(table, url = %url, "listing records");
            let page: ListResponse = self.send(self.http.get(url), "select").await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    async fn create(&self, table: &str, rows: Vec<Fields>) -> anyhow::Result<Vec<Record>> {
        let url = self.table_url(table)?;
        let mut created = Vec::with_capacity(rows.len());
        for chunk in rows.chunks(MAX_BATCH) {
            let records: Vec<_> = chunk.iter().map(|f| json!({ "fields": f })).collect();
            let body = json!({ "records": records });
            let res: RecordsResponse = self
                .send(self.http.post(url.clone()).json(&body), "create")
                .await?;
            created.extend(res.records);
        }
        Ok(created)
    }

    async fn update(&self, table: &str, rows: Vec<RecordUpdate>) -> anyhow::Result<Vec<Record>> {
        let url = self.table_url(table)?;
        let mut updated = Vec::with_capacity(rows.len());
        for chunk in rows.chunks(MAX_BATCH) {
            let body = json!({ "records": chunk });
            let res: RecordsResponse = self
                .send(self.http.patch(url.clone()).json(&body), "update")
                .await?;
            updated.extend(res.records);
        }
        Ok(updated)
    }

    async fn destroy(&self, table: &str, ids: Vec<String>) -> anyhow::Result<Vec<String>> {
        let mut deleted = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_BATCH) {
            let mut url = self.table_url(table)?;
            url.query_pairs_mut()
                .extend_pairs(chunk.iter().map(|id| ("records[]", id.as_str())));
            let res: DeleteResponse = self.send(self.http.delete(url), "destroy").await?;
            deleted.extend(res.records.into_iter().filter(|r| r.deleted).map(|r| r.id));
        }
        Ok(deleted)
    }
}
