//! Progressive formatting while the user types.
//!
//! The shape is guessed from what has been typed so far: a purely numeric
//! value of up to 11 characters is treated as a CPF, anything else as a
//! CNPJ. A numeric CNPJ therefore looks like a CPF until its 12th digit
//! arrives; there is no way to tell the two apart earlier.

use crate::normalizer::{is_numeric, remove_formatting};
use carrepair_core::data_model::{CNPJ_LENGTH, CPF_LENGTH};

/// (position, separator) pairs: the separator goes before the character at `position`
const CPF_SEPARATORS: [(usize, char); 3] = [(3, '.'), (6, '.'), (9, '-')];
const CNPJ_SEPARATORS: [(usize, char); 4] = [(2, '.'), (5, '.'), (8, '/'), (12, '-')];

/// Format a partially typed CPF or CNPJ
pub fn format_document_as_typing(partial: &str) -> String {
    let normalized = remove_formatting(partial);

    if normalized.is_empty() {
        return String::new();
    }

    if is_numeric(&normalized) && normalized.len() <= CPF_LENGTH {
        insert_separators(&normalized, &CPF_SEPARATORS)
    } else {
        let truncated = &normalized[..normalized.len().min(CNPJ_LENGTH)];
        insert_separators(truncated, &CNPJ_SEPARATORS)
    }
}

fn insert_separators(value: &str, separators: &[(usize, char)]) -> String {
    let mut out = String::with_capacity(value.len() + separators.len());
    for (i, c) in value.chars().enumerate() {
        if let Some((_, sep)) = separators.iter().find(|(pos, _)| *pos == i) {
            out.push(*sep);
        }
        out.push(c);
    }
    out
}
