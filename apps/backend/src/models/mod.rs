//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from protocol-core
pub use protocol_core::types::{
    CardId, FormattedDocument, HistoryEntry, Outcome, Page, ProtocolRecord, StudyMode,
};
pub use protocol_core::{ChoiceQuestion, RecallPrompt};

/// Default number of history entries returned when no limit is given.
pub const DEFAULT_HISTORY_PAGE: usize = 150;

// === Cards ===

/// Card listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: CardId,
    pub drug: String,
    pub population: String,
    pub page: Page,
}

impl From<&ProtocolRecord> for CardSummary {
    fn from(record: &ProtocolRecord) -> Self {
        Self {
            id: record.id(),
            drug: record.drug.clone(),
            population: record.population.clone(),
            page: record.page.clone(),
        }
    }
}

/// Query for GET /api/cards and GET /api/quiz/choice
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<CardSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardDetailResponse {
    pub id: CardId,
    pub record: ProtocolRecord,
    /// Reformatted protocol markup.
    pub formatted: String,
    pub missed: bool,
}

// === Formatting ===

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatRequest {
    pub markup: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResponse {
    pub markup: String,
    /// Absent when the input was already structured and passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<FormattedDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RedactRequest {
    pub markup: String,
    pub drug: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RedactResponse {
    pub markup: String,
    pub variants: Vec<String>,
}

// === Progress ===

#[derive(Debug, Serialize, Deserialize)]
pub struct MissedResponse {
    pub cards: Vec<CardSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

/// POST /api/progress/history body; the server stamps the time.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordOutcomeRequest {
    pub mode: StudyMode,
    pub drug: String,
    pub population: String,
    pub result: Outcome,
}
