//! Formatting and redaction endpoints

use axum::Json;
use protocol_core::{format_protocol, redact, variants_of};

use crate::models::*;

/// POST /api/format
pub async fn format(Json(payload): Json<FormatRequest>) -> Json<FormatResponse> {
    let formatted = format_protocol(&payload.markup);
    let document = formatted.document().cloned();

    Json(FormatResponse {
        markup: formatted.into_markup(),
        document,
    })
}

/// POST /api/redact
pub async fn redact_drug(Json(payload): Json<RedactRequest>) -> Json<RedactResponse> {
    Json(RedactResponse {
        markup: redact(&payload.markup, &payload.drug),
        variants: variants_of(&payload.drug),
    })
}
