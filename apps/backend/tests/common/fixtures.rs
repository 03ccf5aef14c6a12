//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

pub const HISTORY_LIMIT: usize = 5;

/// A small deck covering header, drug-dose, and plain-sentence protocols.
pub const SAMPLE_CARDS_JSON: &str = r#"[
    {
        "drug": "Adenosine",
        "population": "Adult",
        "text": "Adenosine, 6 mg rapid IV push. May repeat 12 mg once.",
        "page": 21
    },
    {
        "drug": "Atropine",
        "population": "Adult",
        "text": "Bradycardia: Atropine - Adult 0.5 mg IV every 3-5 min. Max 3 mg total.",
        "page": 18
    },
    {
        "drug": "Albuterol (Proventil) Aerosolized Solution",
        "population": "Pediatric",
        "text": "Respiratory Distress: Albuterol - Pediatric 2.5 mg nebulized. Proventil may be repeated.",
        "page": "34b"
    },
    {
        "drug": "Amiodarone",
        "population": "Adult",
        "html": "<p>Amiodarone, 150 mg IV over 10 minutes.</p>",
        "page": 22
    },
    {
        "drug": "Aspirin",
        "population": "Adult",
        "text": "Chewed tablets. Give Aspirin 324 mg once; do not repeat."
    }
]"#;

/// Card id for a drug/population pair, as the server derives it.
pub fn card_id(drug: &str, population: &str) -> String {
    protocol_core::CardId::new(drug, population).to_string()
}

/// Body for POST /api/progress/history.
pub fn outcome_request(drug: &str, population: &str, result: &str) -> Value {
    json!({
        "mode": "mcq",
        "drug": drug,
        "population": population,
        "result": result,
    })
}
