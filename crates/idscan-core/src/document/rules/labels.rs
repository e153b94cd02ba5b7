//! Label patterns for name fields.

use std::fmt;

use regex::Regex;

use super::patterns::{LABEL_SEPARATOR, LABEL_VALUE};
use crate::error::ConfigError;

/// Name field a label introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameField {
    First,
    Middle,
    Last,
    /// Combined name, split into parts by the name extractor.
    Full,
}

impl NameField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first_name",
            Self::Middle => "middle_name",
            Self::Last => "last_name",
            Self::Full => "full_name",
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled "label, optional separator, value" pattern for one field.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    field: NameField,
    regex: Regex,
}

impl LabelPattern {
    /// Compile a pattern matching any of the given label phrases.
    pub fn new(field: NameField, phrases: &[String]) -> Result<Self, ConfigError> {
        let alternatives: Vec<String> = phrases.iter().filter_map(|p| phrase_pattern(p)).collect();

        if alternatives.is_empty() {
            return Err(ConfigError::EmptyLabels {
                field: field.to_string(),
            });
        }

        let pattern = format!(
            "(?i)(?:{}){}{}",
            alternatives.join("|"),
            LABEL_SEPARATOR,
            LABEL_VALUE
        );

        let regex = Regex::new(&pattern).map_err(|source| ConfigError::Pattern {
            field: field.to_string(),
            source,
        })?;

        Ok(Self { field, regex })
    }

    pub fn field(&self) -> NameField {
        self.field
    }

    /// Return the trimmed value following the label on this line, if any.
    pub fn capture<'t>(&self, line: &'t str) -> Option<&'t str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
    }
}

/// Escape a phrase and let its inner whitespace match any whitespace run.
fn phrase_pattern(phrase: &str) -> Option<String> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(r"\s+"))
    }
}
