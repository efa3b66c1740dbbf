//! API Handlers
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use carrepair_core::{CarRepairError, Classification, DocumentValidation, CARREPAIR_VERSION};
use carrepair_documents as documents;
use carrepair_session::{expiration, guard, inspect_with_leeway, TokenStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub document: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub document: String,
    /// Progressive formatting for a field still being typed
    #[serde(default)]
    pub as_typing: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResponse {
    pub formatted: String,
    pub normalized: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InspectResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": CARREPAIR_VERSION })),
    )
}

pub async fn classify(Json(payload): Json<DocumentRequest>) -> Json<Classification> {
    Json(documents::classify(&payload.document))
}

pub async fn validate(
    State(state): State<AppState>,
    Json(payload): Json<DocumentRequest>,
) -> Json<DocumentValidation> {
    let result = documents::validate_document(&payload.document);

    let outcome = if result.is_valid { "valid" } else { "invalid" };
    state
        .metrics
        .document_validations
        .with_label_values(&[result.kind.as_str(), outcome])
        .inc();
    tracing::debug!(kind = %result.kind, outcome, "document validated");

    Json(result)
}

pub async fn format(Json(payload): Json<FormatRequest>) -> Json<FormatResponse> {
    let formatted = if payload.as_typing {
        documents::format_document_as_typing(&payload.document)
    } else {
        documents::format_document(&payload.document)
    };

    Json(FormatResponse {
        formatted,
        normalized: documents::remove_formatting(&payload.document),
    })
}

pub async fn generate(Query(params): Query<GenerateParams>) -> (StatusCode, Json<Value>) {
    let document = match params.kind.as_deref().unwrap_or("cpf") {
        "cpf" => documents::generate_cpf(),
        "cnpj" => documents::generate_cnpj(),
        "cnpj-alphanumeric" => documents::generate_alphanumeric_cnpj(),
        other => {
            let err = CarRepairError::ValidationError(format!(
                "unknown kind '{}', expected cpf, cnpj or cnpj-alphanumeric",
                other
            ));
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            );
        }
    };

    let formatted = documents::format_document(&document);
    (
        StatusCode::OK,
        Json(json!({ "document": document, "formatted": formatted })),
    )
}

/// Signature-less inspection: reports expiry hints only, never authorizes
pub async fn inspect_session(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Json<InspectResponse> {
    let token = payload.token.as_deref();
    let status = inspect_with_leeway(
        token,
        guard::now_millis(),
        state.config.session.leeway_seconds,
    );

    state
        .metrics
        .session_inspections
        .with_label_values(&[status.as_str()])
        .inc();

    let expires_at = match status {
        TokenStatus::Valid | TokenStatus::Expired => token
            .and_then(carrepair_session::decode_claims)
            .and_then(|claims| expiration(&claims).ok().flatten())
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp as i64, 0)),
        _ => None,
    };

    Json(InspectResponse {
        status: status.as_str().to_string(),
        reason: status.corruption_reason().map(|r| r.as_str().to_string()),
        expires_at,
    })
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        Err(e) => {
            tracing::warn!(error = %e, "metrics encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                e.to_string(),
            )
        }
    }
}
