//! Configuration structures for the scanning service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for idscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdScanConfig {
    /// Document field extraction configuration.
    pub extraction: ExtractionConfig,

    /// HTTP service configuration.
    pub server: ServerConfig,

    /// OCR provider configuration.
    pub ocr: OcrConfig,

    /// Record store configuration.
    pub records: RecordStoreConfig,

    /// Face similarity provider configuration.
    pub face: FaceConfig,

    /// Push relay configuration.
    pub push: PushConfig,
}

/// Document field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keyword identifying documents issued by the target jurisdiction.
    /// Also used verbatim in status messages.
    pub jurisdiction: String,

    /// Recognized label phrases per name field.
    pub labels: LabelConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            jurisdiction: "Silay".to_string(),
            labels: LabelConfig::default(),
        }
    }
}

/// Label phrases recognized in front of name values, English and Filipino.
///
/// Phrases are matched case-insensitively and any whitespace inside a phrase
/// matches a run of whitespace in the OCR text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub first_name: Vec<String>,
    pub middle_name: Vec<String>,
    pub last_name: Vec<String>,

    /// Combined "full name" labels, only consulted when no explicit first or
    /// last name has been seen yet.
    pub full_name: Vec<String>,

    /// Lowercase connectives that belong to the following surname token
    /// when splitting a combined name ("dela" + "cruz").
    pub surname_particles: Vec<String>,
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            first_name: phrases(&["FIRST NAME", "GIVEN NAME", "UNANG PANGALAN"]),
            middle_name: phrases(&["MIDDLE NAME", "M.I.", "GITNANG PANGALAN"]),
            last_name: phrases(&["LAST NAME", "SURNAME", "APELYIDO"]),
            full_name: phrases(&["NAME", "PANGALAN"]),
            surname_particles: phrases(&[
                "de", "del", "dela", "delas", "delos", "la", "las", "los", "san", "santa",
                "santo", "sta", "sta.", "sto", "sto.",
            ]),
        }
    }
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,

    /// Timeout for outbound provider calls, in seconds.
    pub upstream_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_bytes: 10 * 1024 * 1024,
            upstream_timeout_secs: 30,
        }
    }
}

/// OCR provider configuration (Google Cloud Vision compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Annotate endpoint.
    pub endpoint: String,

    /// API key appended as the `key` query parameter.
    pub api_key: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            api_key: None,
        }
    }
}

/// Where member records are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordBackend {
    /// REST document store.
    Http,
    /// Local JSON file containing an array of records.
    File,
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordStoreConfig {
    pub backend: RecordBackend,

    /// Base URL of the REST store (http backend).
    pub endpoint: String,

    /// Bearer token for the REST store.
    pub api_key: Option<String>,

    /// Path to the records file (file backend).
    pub path: PathBuf,

    /// Collection holding member records.
    pub collection: String,

    /// Field matched exactly against the extracted identifier.
    pub identifier_field: String,
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            backend: RecordBackend::File,
            endpoint: "http://localhost:8080".to_string(),
            api_key: None,
            path: PathBuf::from("records.json"),
            collection: "members".to_string(),
            identifier_field: "idNumber".to_string(),
        }
    }
}

/// Face similarity provider configuration (Face++ compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-us.faceplusplus.com/facepp/v3/compare".to_string(),
            api_key: None,
            api_secret: None,
        }
    }
}

/// Push relay configuration (Expo compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    pub endpoint: String,

    /// Optional access token sent as a bearer token.
    pub access_token: Option<String>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://exp.host/--/api/v2/push/send".to_string(),
            access_token: None,
        }
    }
}

impl IdScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IdScanConfig =
            serde_json::from_str(r#"{"extraction": {"jurisdiction": "Bacolod"}}"#).unwrap();

        assert_eq!(config.extraction.jurisdiction, "Bacolod");
        assert_eq!(config.extraction.labels.last_name[0], "LAST NAME");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.records.backend, RecordBackend::File);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IdScanConfig::default();
        config.records.backend = RecordBackend::Http;
        config.server.port = 8081;
        config.save(&path).unwrap();

        let loaded = IdScanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.records.backend, RecordBackend::Http);
        assert_eq!(loaded.server.port, 8081);
    }

    #[test]
    fn test_invalid_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            IdScanConfig::from_file(&path),
            Err(crate::IdScanError::Json(_))
        ));
    }
}
