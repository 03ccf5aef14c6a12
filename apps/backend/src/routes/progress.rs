//! Study progress endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::progress::record_outcome;
use crate::AppState;

/// GET /api/progress/missed
///
/// Missed ids with no matching card are skipped.
pub async fn missed(State(state): State<AppState>) -> Json<MissedResponse> {
    let ids = state.progress.read().await.missed();
    let cards = ids
        .iter()
        .filter_map(|id| state.catalog.get(id))
        .map(CardSummary::from)
        .collect();

    Json(MissedResponse { cards })
}

/// PUT /api/progress/missed/:id
pub async fn mark_missed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = CardId::from_key(&id);
    if state.catalog.get(&id).is_none() {
        return Err(ApiError::NotFound(format!("Card {}", id)));
    }

    state.progress.write().await.mark_missed(id);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/progress/missed/:id
pub async fn unmark_missed(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state
        .progress
        .write()
        .await
        .unmark_missed(&CardId::from_key(&id));
    StatusCode::NO_CONTENT
}

/// GET /api/progress/history
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_PAGE);
    let entries = state.progress.read().await.history(limit);
    Json(HistoryResponse { entries })
}

/// POST /api/progress/history
pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<RecordOutcomeRequest>,
) -> Result<(StatusCode, Json<HistoryEntry>)> {
    if payload.drug.trim().is_empty() {
        return Err(ApiError::BadRequest("drug is required".to_string()));
    }

    let entry = HistoryEntry {
        ts: Utc::now(),
        mode: payload.mode,
        drug: payload.drug,
        population: payload.population,
        result: payload.result,
    };

    let mut store = state.progress.write().await;
    record_outcome(&mut **store, entry.clone());

    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/progress
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.progress.write().await.reset();
    tracing::info!("Study progress reset");
    StatusCode::NO_CONTENT
}
