//! Quiz endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// Cards matching the optional search query.
fn pool(state: &AppState, query: &SearchQuery) -> Vec<ProtocolRecord> {
    state
        .catalog
        .search(query.q.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect()
}

/// GET /api/quiz/choice
///
/// Multiple-choice question drawn from the cards matching `q`.
pub async fn choice(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ChoiceQuestion>> {
    let question = ChoiceQuestion::build(&pool(&state, &query), &mut rand::thread_rng())?;
    tracing::debug!(card = %question.card_id, "built choice question");

    Ok(Json(question))
}

/// GET /api/quiz/typed
pub async fn typed(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<RecallPrompt>> {
    let prompt = RecallPrompt::typed(&pool(&state, &query), &mut rand::thread_rng())?;
    tracing::debug!(card = %prompt.card_id, "built typed recall prompt");

    Ok(Json(prompt))
}

/// GET /api/quiz/case
pub async fn case(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<RecallPrompt>> {
    let prompt = RecallPrompt::case(&pool(&state, &query), &mut rand::thread_rng())?;
    tracing::debug!(card = %prompt.card_id, "built case prompt");

    Ok(Json(prompt))
}
