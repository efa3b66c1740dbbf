//! Input normalization for document fields.
//!
//! Users type documents with or without punctuation, spaces and lowercase
//! letters. Everything downstream works on the normalized form:
//! - ASCII letters and digits only
//! - Uppercase

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not an ASCII letter or digit
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^0-9A-Za-z]").unwrap();

    /// Anything that is not an ASCII digit
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Strip all non-alphanumeric characters and uppercase the rest
pub fn remove_formatting(input: &str) -> String {
    NON_ALPHANUMERIC.replace_all(input, "").to_ascii_uppercase()
}

/// Keep only ASCII digits
pub fn digits_only(input: &str) -> String {
    NON_DIGIT.replace_all(input, "").into_owned()
}

/// True when the string is non-empty and made of ASCII digits
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True when every character equals the first one (e.g. "00000000000")
pub(crate) fn all_same(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(first) => bytes.all(|b| b == first),
        None => true,
    }
}
