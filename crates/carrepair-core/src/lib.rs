//! CarRepair Core: data model, unified errors and configuration
//!
//! Tipos compartilhados entre o validador de documentos e o guarda de sessão.

pub mod config;
pub mod data_model;
pub mod error;

pub use config::{AppConfig, GuardConfig, SessionKeys};
pub use data_model::{Classification, DocumentKind, DocumentValidation, TaxDocument};
pub use error::CarRepairError;

/// Workspace version, reported by the API health endpoint
pub const CARREPAIR_VERSION: &str = env!("CARGO_PKG_VERSION");
