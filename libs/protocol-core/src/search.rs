//! Record search.

use crate::types::ProtocolRecord;

/// Lowercase, collapse whitespace, trim. Idempotent.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Records whose drug, population, or text contains the query.
/// An empty query matches everything.
pub fn filter_records<'a>(records: &'a [ProtocolRecord], query: &str) -> Vec<&'a ProtocolRecord> {
    let query = normalize(query);
    if query.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| {
            [&record.drug, &record.population, &record.text]
                .into_iter()
                .any(|field| normalize(field).contains(&query))
        })
        .collect()
}
