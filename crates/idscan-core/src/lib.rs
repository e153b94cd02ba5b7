//! Core library for identity document scanning.
//!
//! This crate provides:
//! - Field extraction from raw OCR text (jurisdiction, identifier, names)
//! - Extraction result and configuration models
//!
//! Extraction is a pure function of its input and never fails:
//!
//! ```
//! let result = idscan_core::extract("SILAY CITY PWD ID\n1234567890123");
//! assert!(result.belongs_to_jurisdiction);
//! assert_eq!(result.identifier, "1234567890123");
//! ```

pub mod document;
pub mod error;
pub mod models;

pub use document::{extract, DocumentParser, IdDocumentParser};
pub use error::{ConfigError, IdScanError, Result};
pub use models::config::{ExtractionConfig, IdScanConfig, LabelConfig};
pub use models::document::{ExtractionResult, PersonName};
