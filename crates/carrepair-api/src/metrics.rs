//! Prometheus counters exposed on `/metrics`.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    /// Document validations by kind and outcome
    pub document_validations: IntCounterVec,
    /// Token inspections by resulting status
    pub session_inspections: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let document_validations = IntCounterVec::new(
            Opts::new("carrepair_document_validations_total", "Document validations"),
            &["kind", "outcome"],
        )?;
        let session_inspections = IntCounterVec::new(
            Opts::new("carrepair_session_inspections_total", "Session token inspections"),
            &["status"],
        )?;

        registry.register(Box::new(document_validations.clone()))?;
        registry.register(Box::new(session_inspections.clone()))?;

        Ok(Self {
            registry,
            document_validations,
            session_inspections,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
