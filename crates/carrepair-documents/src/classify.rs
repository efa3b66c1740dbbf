//! Length-based classification of document input.
//!
//! Classification only decides *which* document the user is typing; check
//! digits are verified separately by `is_valid_cpf` / `is_valid_cnpj`.

use crate::normalizer::remove_formatting;
use carrepair_core::data_model::{Classification, DocumentKind, TaxDocument, CNPJ_LENGTH, CPF_LENGTH};

/// Message for empty input
pub const EMPTY_REASON: &str = "Enter 11 digits or 14 characters";

/// Classify user input as a CPF candidate, CNPJ candidate, or unknown
pub fn classify(input: &str) -> Classification {
    let normalized = remove_formatting(input);
    let len = normalized.len();
    let kind = DocumentKind::from_normalized(&normalized);

    let reason = match kind {
        DocumentKind::Cpf | DocumentKind::Cnpj => None,
        DocumentKind::Unknown => Some(unknown_reason(len)),
    };

    Classification {
        kind,
        normalized_length: len,
        reason,
    }
}

fn unknown_reason(len: usize) -> String {
    if len == 0 {
        EMPTY_REASON.to_string()
    } else if len < CPF_LENGTH {
        format!("CPF incomplete ({}/{} digits)", len, CPF_LENGTH)
    } else if len < CNPJ_LENGTH {
        format!("CNPJ incomplete ({}/{} characters)", len, CNPJ_LENGTH)
    } else {
        format!("Too many characters ({}/{} maximum)", len, CNPJ_LENGTH)
    }
}

/// Build the transient `TaxDocument` value for an input
pub fn parse(input: &str) -> TaxDocument {
    TaxDocument::from_parts(input, remove_formatting(input))
}
