//! Quiz assembly: multiple choice, typed recall, and case prompts.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{QuizError, Result};
use crate::redact::redact;
use crate::segmenter::format_protocol_markup;
use crate::types::{CardId, Page, ProtocolRecord, StudyMode};

/// Options offered per question, the answer included.
pub const CHOICE_COUNT: usize = 4;

/// Scenario lines for case mode; one is drawn per prompt.
pub const CASE_PROMPTS: [&str; 4] = [
    "You're on a call and need this medication. What's the correct dosing and route guidance?",
    "A provider asks for a quick refresher. Give the dosing details for this med.",
    "You're prepping meds: confirm dose, route, and any max/repeat notes.",
    "Peds vs adult can differ. What does the protocol say here?",
];

/// "Which medication matches this protocol?"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub card_id: CardId,
    pub population: String,
    /// Formatted protocol markup with the answer redacted.
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: String,
}

impl ChoiceQuestion {
    /// Pick a record at random and three other distinct drug names as
    /// distractors.
    pub fn build<R: Rng + ?Sized>(records: &[ProtocolRecord], rng: &mut R) -> Result<Self> {
        let drugs: BTreeSet<&str> = records.iter().map(|r| r.drug.as_str()).collect();
        let not_enough = QuizError::NotEnoughCards {
            needed: CHOICE_COUNT,
            available: drugs.len(),
        };
        if drugs.len() < CHOICE_COUNT {
            return Err(not_enough);
        }

        let correct = records.choose(rng).ok_or(not_enough)?;

        let mut distractors: Vec<&str> = drugs
            .into_iter()
            .filter(|drug| *drug != correct.drug)
            .collect();
        distractors.shuffle(rng);

        let mut choices: Vec<String> = std::iter::once(correct.drug.clone())
            .chain(
                distractors
                    .into_iter()
                    .take(CHOICE_COUNT - 1)
                    .map(str::to_string),
            )
            .collect();
        choices.shuffle(rng);

        let prompt = redact(&format_protocol_markup(&correct.markup()), &correct.drug);

        Ok(Self {
            card_id: correct.id(),
            population: correct.population.clone(),
            prompt,
            choices,
            answer: correct.drug.clone(),
        })
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.answer
    }
}

/// Recall the protocol for a named card, then reveal it.
///
/// Typed mode asks for the dosing from memory. Case mode adds a scenario
/// line and reports the source page with the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallPrompt {
    pub card_id: CardId,
    pub mode: StudyMode,
    pub drug: String,
    pub population: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Protocol markup revealed after the attempt.
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
}

impl RecallPrompt {
    /// Typed recall for a random record.
    pub fn typed<R: Rng + ?Sized>(records: &[ProtocolRecord], rng: &mut R) -> Result<Self> {
        let record = records.choose(rng).ok_or(QuizError::EmptyPool)?;
        Ok(Self::for_record(record, StudyMode::Typed, None, None))
    }

    /// Case prompt for a random record with a random scenario line.
    pub fn case<R: Rng + ?Sized>(records: &[ProtocolRecord], rng: &mut R) -> Result<Self> {
        let record = records.choose(rng).ok_or(QuizError::EmptyPool)?;
        let scenario = CASE_PROMPTS.choose(rng).map(|s| s.to_string());
        Ok(Self::for_record(
            record,
            StudyMode::Case,
            scenario,
            Some(record.page.clone()),
        ))
    }

    fn for_record(
        record: &ProtocolRecord,
        mode: StudyMode,
        scenario: Option<String>,
        page: Option<Page>,
    ) -> Self {
        Self {
            card_id: record.id(),
            mode,
            drug: record.drug.clone(),
            population: record.population.clone(),
            scenario,
            answer: record.markup(),
            page,
        }
    }
}
