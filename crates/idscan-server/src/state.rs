//! Shared state for request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use idscan_core::models::config::{IdScanConfig, RecordBackend};
use idscan_core::IdDocumentParser;

use crate::collaborators::{
    http_client, ExpoPushClient, FaceMatcher, FacePlusPlusClient, HttpRecordStore, PushRelay,
    RecordStore, StaticRecordStore, TextRecognizer, VisionOcrClient,
};
use crate::error::ServerError;

/// Where verified members are looked up.
#[derive(Debug, Clone)]
pub struct RecordLookup {
    pub collection: String,
    pub identifier_field: String,
}

impl Default for RecordLookup {
    fn default() -> Self {
        Self {
            collection: "members".to_string(),
            identifier_field: "idNumber".to_string(),
        }
    }
}

/// Application state shared across routes.
#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<IdDocumentParser>,
    pub ocr: Arc<dyn TextRecognizer>,
    pub records: Arc<dyn RecordStore>,
    pub face: Arc<dyn FaceMatcher>,
    pub push: Arc<dyn PushRelay>,
    pub lookup: RecordLookup,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        parser: IdDocumentParser,
        ocr: Arc<dyn TextRecognizer>,
        records: Arc<dyn RecordStore>,
        face: Arc<dyn FaceMatcher>,
        push: Arc<dyn PushRelay>,
    ) -> Self {
        Self {
            parser: Arc::new(parser),
            ocr,
            records,
            face,
            push,
            lookup: RecordLookup::default(),
            started_at: Instant::now(),
        }
    }

    pub fn with_lookup(mut self, lookup: RecordLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Build state with provider clients from configuration.
    pub fn from_config(config: &IdScanConfig) -> Result<Self, ServerError> {
        let parser = IdDocumentParser::from_config(&config.extraction)?;
        let client = http_client(Duration::from_secs(config.server.upstream_timeout_secs))?;

        let records: Arc<dyn RecordStore> = match config.records.backend {
            RecordBackend::Http => {
                info!("Using record store at {}", config.records.endpoint);
                Arc::new(HttpRecordStore::new(client.clone(), &config.records))
            }
            RecordBackend::File => {
                info!("Using record file {}", config.records.path.display());
                Arc::new(StaticRecordStore::from_file(&config.records.path)?)
            }
        };

        let state = Self::new(
            parser,
            Arc::new(VisionOcrClient::new(client.clone(), &config.ocr)),
            records,
            Arc::new(FacePlusPlusClient::new(client.clone(), &config.face)),
            Arc::new(ExpoPushClient::new(client, &config.push)),
        )
        .with_lookup(RecordLookup {
            collection: config.records.collection.clone(),
            identifier_field: config.records.identifier_field.clone(),
        });

        Ok(state)
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
