//! Card endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use protocol_core::format_protocol_markup;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/cards
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<CardListResponse> {
    let cards: Vec<CardSummary> = state
        .catalog
        .search(query.q.as_deref().unwrap_or_default())
        .into_iter()
        .map(CardSummary::from)
        .collect();

    Json(CardListResponse {
        total: cards.len(),
        cards,
    })
}

/// GET /api/cards/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CardDetailResponse>> {
    let id = CardId::from_key(&id);
    let record = state
        .catalog
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", id)))?;

    let missed = state.progress.read().await.is_missed(&id);

    Ok(Json(CardDetailResponse {
        formatted: format_protocol_markup(&record.markup()),
        record: record.clone(),
        missed,
        id,
    }))
}
