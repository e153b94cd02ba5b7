//! Jurisdiction keyword detection.

use crate::error::ConfigError;

/// Case-insensitive substring test for the jurisdiction keyword.
///
/// Matching is deliberately not word-bounded: "SILAYCITY" still counts.
#[derive(Debug, Clone)]
pub struct JurisdictionMatcher {
    keyword: String,
    folded: String,
}

impl JurisdictionMatcher {
    pub fn new(keyword: &str) -> Result<Self, ConfigError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ConfigError::EmptyJurisdiction);
        }

        Ok(Self {
            keyword: keyword.to_string(),
            folded: keyword.to_lowercase(),
        })
    }

    /// The keyword as configured, used in status messages.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Whether the keyword occurs anywhere in the text.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}
