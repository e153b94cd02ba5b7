//! Common regex patterns for identity document extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Number of digits in a member identifier.
pub const IDENTIFIER_LENGTH: usize = 13;

/// Separator allowed between a label and its value.
pub const LABEL_SEPARATOR: &str = r"\s*[:\-]?\s*";

/// Captured label value: must start with something other than whitespace or
/// a separator, then runs to the end of the line.
pub const LABEL_VALUE: &str = r"([^\s:\-].*)";

lazy_static! {
    // Maximal run of ASCII digits; identifiers are the runs of IDENTIFIER_LENGTH
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"[0-9]+"
    ).unwrap();
}
