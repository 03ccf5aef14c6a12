//! Missed-item and history bookkeeping keyed by card identity.

use std::collections::{BTreeSet, VecDeque};

use protocol_core::{CardId, HistoryEntry};

/// Storage for study progress.
pub trait ProgressStore: Send + Sync {
    /// Missed card ids in key order.
    fn missed(&self) -> Vec<CardId>;

    fn is_missed(&self, id: &CardId) -> bool;

    fn mark_missed(&mut self, id: CardId);

    fn unmark_missed(&mut self, id: &CardId);

    /// Up to `limit` history entries, newest first.
    fn history(&self, limit: usize) -> Vec<HistoryEntry>;

    /// Prepend an entry, dropping the oldest past the store's cap.
    fn push_history(&mut self, entry: HistoryEntry);

    /// Clear missed set and history.
    fn reset(&mut self);
}

/// Record a study outcome: add it to history and update the missed set
/// the way the outcome implies.
pub fn record_outcome(store: &mut dyn ProgressStore, entry: HistoryEntry) {
    match entry.result.missed_effect() {
        Some(true) => store.mark_missed(entry.card_id()),
        Some(false) => store.unmark_missed(&entry.card_id()),
        None => {}
    }
    store.push_history(entry);
}

/// Process-local progress store.
#[derive(Debug)]
pub struct InMemoryProgress {
    missed: BTreeSet<CardId>,
    history: VecDeque<HistoryEntry>,
    history_limit: usize,
}

impl InMemoryProgress {
    pub fn new(history_limit: usize) -> Self {
        Self {
            missed: BTreeSet::new(),
            history: VecDeque::new(),
            history_limit,
        }
    }
}

impl ProgressStore for InMemoryProgress {
    fn missed(&self) -> Vec<CardId> {
        self.missed.iter().cloned().collect()
    }

    fn is_missed(&self, id: &CardId) -> bool {
        self.missed.contains(id)
    }

    fn mark_missed(&mut self, id: CardId) {
        self.missed.insert(id);
    }

    fn unmark_missed(&mut self, id: &CardId) {
        self.missed.remove(id);
    }

    fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history.iter().take(limit).cloned().collect()
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push_front(entry);
        self.history.truncate(self.history_limit);
    }

    fn reset(&mut self) {
        self.missed.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use protocol_core::{Outcome, StudyMode};

    fn entry(drug: &str, result: Outcome) -> HistoryEntry {
        HistoryEntry {
            ts: Utc::now(),
            mode: StudyMode::Mcq,
            drug: drug.to_string(),
            population: "Adult".to_string(),
            result,
        }
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let mut store = InMemoryProgress::new(3);
        for drug in ["Atropine", "Adenosine", "Amiodarone", "Diltiazem"] {
            store.push_history(entry(drug, Outcome::Revealed));
        }

        let drugs: Vec<_> = store.history(10).into_iter().map(|e| e.drug).collect();
        assert_eq!(drugs, vec!["Diltiazem", "Amiodarone", "Adenosine"]);
        assert_eq!(store.history(1).len(), 1);
    }

    #[test]
    fn outcomes_update_missed_set() {
        let mut store = InMemoryProgress::new(300);
        let id = CardId::new("Atropine", "Adult");

        record_outcome(&mut store, entry("Atropine", Outcome::Wrong));
        assert!(store.is_missed(&id));

        record_outcome(&mut store, entry("Atropine", Outcome::Revealed));
        assert!(store.is_missed(&id));

        record_outcome(&mut store, entry("Atropine", Outcome::Correct));
        assert!(!store.is_missed(&id));
        assert_eq!(store.history(10).len(), 3);
    }

    #[test]
    fn missed_set_is_deduplicated_by_identity() {
        let mut store = InMemoryProgress::new(300);
        store.mark_missed(CardId::new("Atropine", "Adult"));
        store.mark_missed(CardId::new(" atropine ", "ADULT"));
        assert_eq!(store.missed(), vec![CardId::new("Atropine", "Adult")]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = InMemoryProgress::new(300);
        record_outcome(&mut store, entry("Atropine", Outcome::Missed));
        store.reset();
        assert!(store.missed().is_empty());
        assert!(store.history(10).is_empty());
    }
}
