//! Member record store.
//!
//! Lookups are exact matches on a single field of a named collection. When
//! the store returns several records only the first is used.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{check_status, UpstreamError};
use idscan_core::models::config::RecordStoreConfig;

/// A member record as stored, field name to value.
pub type Record = Map<String, Value>;

/// Queryable collection of member records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find the first record in `collection` whose `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Record>, UpstreamError>;
}

/// REST document store client.
///
/// Issues `GET {endpoint}/{collection}?{field}={value}` and expects a JSON
/// array of records, or an object with a `documents` array.
pub struct HttpRecordStore {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpRecordStore {
    pub fn new(client: Client, config: &RecordStoreConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QueryResponse {
    Records(Vec<Record>),
    Wrapped { documents: Vec<Record> },
}

impl QueryResponse {
    fn into_first(self) -> Option<Record> {
        match self {
            Self::Records(records) | Self::Wrapped { documents: records } => {
                records.into_iter().next()
            }
        }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Record>, UpstreamError> {
        let url = format!("{}/{}", self.endpoint, collection);
        let mut builder = self.client.get(&url).query(&[(field, value)]);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = check_status(builder.send().await?).await?;
        let parsed: QueryResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(parsed.into_first())
    }
}

/// On-disk records layout: a bare array is a single unnamed collection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Collections(HashMap<String, Vec<Record>>),
    Single(Vec<Record>),
}

/// Records held in memory, loaded from a JSON file or built directly.
#[derive(Debug, Default, Clone)]
pub struct StaticRecordStore {
    collections: HashMap<String, Vec<Record>>,
    /// Records that answer every collection name.
    shared: Vec<Record>,
}

impl StaticRecordStore {
    /// Store answering every collection from one list of records.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            collections: HashMap::new(),
            shared: records,
        }
    }

    /// Add a named collection.
    pub fn with_collection(mut self, name: impl Into<String>, records: Vec<Record>) -> Self {
        self.collections.insert(name.into(), records);
        self
    }

    /// Load records from a JSON file holding either an array of records or
    /// an object of collection name to array.
    pub fn from_file(path: &Path) -> Result<Self, UpstreamError> {
        let content = std::fs::read_to_string(path)?;
        let parsed: RecordsFile =
            serde_json::from_str(&content).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let store = match parsed {
            RecordsFile::Collections(collections) => Self {
                collections,
                shared: Vec::new(),
            },
            RecordsFile::Single(records) => Self::new(records),
        };

        debug!(
            "Loaded {} records from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.shared.len() + self.collections.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn records(&self, collection: &str) -> &[Record] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&self.shared)
    }
}

/// Exact match of a stored value against the looked-up string.
fn field_matches(stored: &Value, value: &str) -> bool {
    match stored {
        Value::String(s) => s == value,
        Value::Number(n) => n.to_string() == value,
        _ => false,
    }
}

#[async_trait]
impl RecordStore for StaticRecordStore {
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Record>, UpstreamError> {
        Ok(self
            .records(collection)
            .iter()
            .find(|r| r.get(field).is_some_and(|v| field_matches(v, value)))
            .cloned())
    }
}
