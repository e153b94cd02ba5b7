//! Person name extraction.
//!
//! A single top-to-bottom pass over the lines. On every line the explicit
//! first, middle and last name labels are tried independently and each hit
//! overwrites the field. The combined "NAME" label is tried last, and only
//! while neither a first nor a last name has been recorded yet.
//!
//! The outcome therefore depends on line order: a combined-name line that
//! comes first fills all parts, and later explicit labels still replace
//! individual parts.

use std::collections::HashSet;

use super::labels::{LabelPattern, NameField};
use crate::error::ConfigError;
use crate::models::config::LabelConfig;
use crate::models::document::PersonName;

/// Name extractor built from label configuration.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    first: LabelPattern,
    middle: LabelPattern,
    last: LabelPattern,
    full: LabelPattern,
    particles: HashSet<String>,
}

impl NameExtractor {
    pub fn new(labels: &LabelConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            first: LabelPattern::new(NameField::First, &labels.first_name)?,
            middle: LabelPattern::new(NameField::Middle, &labels.middle_name)?,
            last: LabelPattern::new(NameField::Last, &labels.last_name)?,
            full: LabelPattern::new(NameField::Full, &labels.full_name)?,
            particles: labels
                .surname_particles
                .iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        })
    }

    /// Extract name parts from text.
    pub fn extract(&self, text: &str) -> PersonName {
        let mut name = PersonName::default();

        for line in text.lines() {
            if let Some(value) = self.first.capture(line) {
                name.first = value.to_string();
            }
            if let Some(value) = self.middle.capture(line) {
                name.middle = value.to_string();
            }
            if let Some(value) = self.last.capture(line) {
                name.last = value.to_string();
            }

            if name.first.is_empty() && name.last.is_empty() {
                if let Some(value) = self.full.capture(line) {
                    self.apply_full_name(value, &mut name);
                }
            }
        }

        name
    }

    fn apply_full_name(&self, value: &str, name: &mut PersonName) {
        let tokens = self.tokenize(value);
        if tokens.len() < 2 {
            return;
        }

        name.first = tokens[0].clone();
        name.last = tokens[tokens.len() - 1].clone();
        if tokens.len() == 3 {
            name.middle = tokens[1].clone();
        }
    }

    /// Split a combined name on whitespace, binding surname particles to the
    /// word that follows them ("Dela Cruz" stays one token).
    pub fn tokenize(&self, value: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut pending: Vec<&str> = Vec::new();

        for word in value.split_whitespace() {
            pending.push(word);
            if !self.particles.contains(&word.to_lowercase()) {
                tokens.push(pending.join(" "));
                pending.clear();
            }
        }

        // Trailing particles with nothing to attach to.
        if !pending.is_empty() {
            tokens.push(pending.join(" "));
        }

        tokens
    }
}
