//! Member identifier extraction.
//!
//! An identifier is any run of exactly [`IDENTIFIER_LENGTH`] digits bounded
//! by non-digits or the ends of the text. Letters glued to the run
//! (`ID1234567890123`) do not disqualify it. No checksum or format
//! validation is applied; the first run in document order wins.

use regex::Match;

use super::patterns::{DIGIT_RUN, IDENTIFIER_LENGTH};
use super::{ExtractionMatch, FieldExtractor};

/// Digit runs of identifier length, in document order.
fn identifier_runs(text: &str) -> impl Iterator<Item = Match<'_>> {
    DIGIT_RUN
        .find_iter(text)
        .filter(|m| m.as_str().len() == IDENTIFIER_LENGTH)
}

fn to_match(m: Match<'_>) -> ExtractionMatch<String> {
    ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end())
}

/// Identifier field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierExtractor;

impl IdentifierExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for IdentifierExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        identifier_runs(text).next().map(to_match)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        identifier_runs(text).map(to_match).collect()
    }
}

/// Extract the first identifier from text.
pub fn extract_identifier(text: &str) -> Option<String> {
    IdentifierExtractor::new().extract(text).map(|m| m.value)
}

/// Whether a string is a well-formed identifier.
pub fn is_identifier(value: &str) -> bool {
    value.len() == IDENTIFIER_LENGTH && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_identifier_on_own_line() {
        let text = "SILAY CITY PWD ID\n1234567890123\nValid until 2030";
        assert_eq!(extract_identifier(text), Some("1234567890123".to_string()));
    }

    #[test]
    fn test_extract_identifier_after_label() {
        assert_eq!(
            extract_identifier("ID NO: 0645012000123"),
            Some("0645012000123".to_string())
        );
        assert_eq!(
            extract_identifier("ID NO.-0645012000123-"),
            Some("0645012000123".to_string())
        );
    }

    #[test]
    fn test_first_identifier_wins() {
        let text = "1111111111111 and later 2222222222222";
        assert_eq!(extract_identifier(text), Some("1111111111111".to_string()));

        let all = IdentifierExtractor::new().extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].value, "2222222222222");
        assert_eq!(all[1].position, Some((24, 37)));
    }

    #[test]
    fn test_wrong_length_runs_ignored() {
        assert_eq!(extract_identifier("123456789012"), None); // 12 digits
        assert_eq!(extract_identifier("12345678901234"), None); // 14 digits
        assert_eq!(
            extract_identifier("12345678901234 then 9876543210987"),
            Some("9876543210987".to_string())
        );
    }

    #[test]
    fn test_grouped_digits_not_joined() {
        assert_eq!(extract_identifier("0645-012-000-123"), None);
        assert_eq!(extract_identifier("no digits at all"), None);
        assert_eq!(extract_identifier(""), None);
    }

    #[test]
    fn test_runs_glued_to_non_digits() {
        let expected = Some("1234567890123".to_string());
        assert_eq!(extract_identifier("ID1234567890123"), expected);
        assert_eq!(extract_identifier("No1234567890123X"), expected);
        assert_eq!(extract_identifier("_1234567890123"), expected);
        assert_eq!(extract_identifier("Nº1234567890123ñ"), expected);
        assert_eq!(extract_identifier("ID1234567890123_4"), expected);
    }

    #[test]
    fn test_glued_run_positions() {
        let all = IdentifierExtractor::new().extract_all("ID1111111111111/X2222222222222");
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["1111111111111", "2222222222222"]);
        assert_eq!(all[0].position, Some((2, 15)));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("1234567890123"));
        assert!(!is_identifier("123456789012"));
        assert!(!is_identifier("12345678901a3"));
    }
}
