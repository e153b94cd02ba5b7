//! Identity document extraction models.

use serde::{Deserialize, Serialize};

/// Fields recovered from the OCR text of one identity document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Whether the jurisdiction keyword occurs anywhere in the text.
    pub belongs_to_jurisdiction: bool,

    /// Member identifier (13 digits), empty when none was found.
    pub identifier: String,

    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,

    /// Human readable summary derived from the flag and identifier.
    pub status_message: String,
}

impl ExtractionResult {
    /// Whether an identifier was found.
    pub fn has_identifier(&self) -> bool {
        !self.identifier.is_empty()
    }

    /// Whether the result should be looked up in the record store.
    pub fn is_verifiable(&self) -> bool {
        self.belongs_to_jurisdiction && self.has_identifier()
    }

    /// Name fields as a [`PersonName`].
    pub fn name(&self) -> PersonName {
        PersonName {
            first: self.first_name.clone(),
            middle: self.middle_name.clone(),
            last: self.last_name.clone(),
        }
    }
}

/// Given, middle and last name, each possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl PersonName {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.middle.is_empty() && self.last.is_empty()
    }

    /// Space-joined non-empty parts.
    pub fn full(&self) -> String {
        [&self.first, &self.middle, &self.last]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Build the status message for a document.
pub fn status_message(jurisdiction: &str, belongs: bool, identifier: &str) -> String {
    if !belongs {
        format!("Not a {} document.", jurisdiction)
    } else if !identifier.is_empty() {
        format!("Found {} identifier {}.", jurisdiction, identifier)
    } else {
        format!("{} document detected but no identifier found.", jurisdiction)
    }
}
