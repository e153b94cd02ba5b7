//! Identity document parser combining the field rules.

use lazy_static::lazy_static;
use tracing::debug;

use crate::error::ConfigError;
use crate::models::config::ExtractionConfig;
use crate::models::document::{status_message, ExtractionResult};

use super::rules::{FieldExtractor, IdentifierExtractor, JurisdictionMatcher, NameExtractor};

/// Trait for identity document parsing.
///
/// Parsing is total: any input, including empty or garbage text, yields a
/// result with empty fields rather than an error.
pub trait DocumentParser {
    /// Parse document fields from OCR text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Rule-based identity document parser.
#[derive(Debug, Clone)]
pub struct IdDocumentParser {
    jurisdiction: JurisdictionMatcher,
    identifier: IdentifierExtractor,
    names: NameExtractor,
}

impl IdDocumentParser {
    /// Create a parser with the default jurisdiction and label phrases.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
            .expect("default extraction config is valid")
    }

    /// Create a parser from configuration, validating keyword and labels.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            jurisdiction: JurisdictionMatcher::new(&config.jurisdiction)?,
            identifier: IdentifierExtractor::new(),
            names: NameExtractor::new(&config.labels)?,
        })
    }

    /// Configured jurisdiction keyword.
    pub fn jurisdiction(&self) -> &str {
        self.jurisdiction.keyword()
    }
}

impl Default for IdDocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for IdDocumentParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let belongs = self.jurisdiction.matches(text);
        let identifier = self
            .identifier
            .extract(text)
            .map(|m| m.value)
            .unwrap_or_default();
        let name = self.names.extract(text);

        debug!(
            "Parsed {} characters: jurisdiction={}, identifier_found={}, name_found={}",
            text.len(),
            belongs,
            !identifier.is_empty(),
            !name.is_empty()
        );

        ExtractionResult {
            status_message: status_message(self.jurisdiction.keyword(), belongs, &identifier),
            belongs_to_jurisdiction: belongs,
            identifier,
            first_name: name.first,
            middle_name: name.middle,
            last_name: name.last,
        }
    }
}

lazy_static! {
    static ref DEFAULT_PARSER: IdDocumentParser = IdDocumentParser::new();
}

/// Extract document fields using the default configuration.
pub fn extract(text: &str) -> ExtractionResult {
    DEFAULT_PARSER.parse(text)
}
