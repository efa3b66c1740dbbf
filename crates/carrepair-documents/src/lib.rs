//! CarRepair Documents: CPF and CNPJ validation and formatting
//!
//! Stateless functions used by the registration forms: classify what the
//! user is typing, format it progressively, and verify check digits before
//! the data is submitted. Validators never fail: malformed input of any
//! kind is simply `false`.
//!
//! # Example
//!
//! ```
//! use carrepair_documents::{format_cpf, is_valid_cnpj, is_valid_cpf, validate_document};
//!
//! assert!(is_valid_cpf("529.982.247-25"));
//! assert!(is_valid_cnpj("12.ABC.345/01DE-45"));
//! assert_eq!(format_cpf("52998224725"), "529.982.247-25");
//!
//! let result = validate_document("529.982.2");
//! assert_eq!(result.error.as_deref(), Some("CPF incomplete (7/11 digits)"));
//! ```

pub mod classify;
pub mod cnpj;
pub mod cpf;
pub mod generator;
pub mod normalizer;
pub mod typing;

pub use classify::{classify, parse};
pub use cnpj::{complete_cnpj, format_cnpj, is_valid_cnpj};
pub use cpf::{format_cpf, is_valid_cpf};
pub use generator::{generate_alphanumeric_cnpj, generate_cnpj, generate_cpf};
pub use normalizer::remove_formatting;
pub use typing::format_document_as_typing;

use carrepair_core::data_model::{DocumentKind, DocumentValidation};

/// Error shown for a CPF with wrong check digits
pub const INVALID_CPF: &str = "Invalid CPF";

/// Error shown for a CNPJ with wrong check digits
pub const INVALID_CNPJ: &str = "Invalid CNPJ";

/// Validate a document field, returning a UI-ready message on failure
pub fn validate_document(input: &str) -> DocumentValidation {
    let classification = classify(input);

    match classification.kind {
        DocumentKind::Cpf if is_valid_cpf(input) => DocumentValidation::valid(DocumentKind::Cpf),
        DocumentKind::Cpf => DocumentValidation::invalid(DocumentKind::Cpf, INVALID_CPF),
        DocumentKind::Cnpj if is_valid_cnpj(input) => DocumentValidation::valid(DocumentKind::Cnpj),
        DocumentKind::Cnpj => DocumentValidation::invalid(DocumentKind::Cnpj, INVALID_CNPJ),
        DocumentKind::Unknown => DocumentValidation::invalid(
            DocumentKind::Unknown,
            classification.reason.unwrap_or_default(),
        ),
    }
}

/// Format a complete document with the pattern of its kind
pub fn format_document(input: &str) -> String {
    match classify(input).kind {
        DocumentKind::Cpf => format_cpf(input),
        DocumentKind::Cnpj => format_cnpj(input),
        DocumentKind::Unknown => input.to_uppercase(),
    }
}
