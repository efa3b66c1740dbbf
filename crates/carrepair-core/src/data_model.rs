//! Data Model: TaxDocument, Classification, DocumentValidation
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a CPF
pub const CPF_LENGTH: usize = 11;

/// Number of characters in a CNPJ
pub const CNPJ_LENGTH: usize = 14;

/// Kind of Brazilian tax document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    /// Cadastro de Pessoas Físicas (individual, 11 digits)
    Cpf,
    /// Cadastro Nacional da Pessoa Jurídica (company, 14 characters)
    Cnpj,
    /// Incomplete or unrecognized input
    Unknown,
}

impl DocumentKind {
    /// Derive the kind from an already normalized (alphanumeric, uppercase) string.
    ///
    /// Only exact lengths are classified: 11 digits is a CPF, 14 characters
    /// is a CNPJ. Everything else stays `Unknown`.
    pub fn from_normalized(normalized: &str) -> Self {
        if normalized.len() == CPF_LENGTH && normalized.bytes().all(|b| b.is_ascii_digit()) {
            DocumentKind::Cpf
        } else if normalized.len() == CNPJ_LENGTH {
            DocumentKind::Cnpj
        } else {
            DocumentKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
            DocumentKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-entered document, as typed and as normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDocument {
    /// Original user input
    pub raw: String,
    /// Digits and letters only, uppercase
    pub normalized: String,
    /// Kind derived from the normalized length
    pub kind: DocumentKind,
}

impl TaxDocument {
    pub fn from_parts(raw: impl Into<String>, normalized: impl Into<String>) -> Self {
        let normalized = normalized.into();
        let kind = DocumentKind::from_normalized(&normalized);
        Self {
            raw: raw.into(),
            normalized,
            kind,
        }
    }
}

/// Outcome of classifying user input by length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: DocumentKind,
    /// Length of the normalized input
    pub normalized_length: usize,
    /// Human-readable reason when `kind` is `Unknown`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Classification {
    pub fn is_unknown(&self) -> bool {
        self.kind == DocumentKind::Unknown
    }
}

/// Form-level validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentValidation {
    pub is_valid: bool,
    pub kind: DocumentKind,
    /// Field-level message for the UI (`None` when valid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentValidation {
    pub fn valid(kind: DocumentKind) -> Self {
        Self {
            is_valid: true,
            kind,
            error: None,
        }
    }

    pub fn invalid(kind: DocumentKind, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            kind,
            error: Some(error.into()),
        }
    }
}
