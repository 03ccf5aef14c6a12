//! Core types for protocol review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::search::normalize;

/// Separator between the drug and population halves of a [`CardId`].
pub const CARD_ID_SEPARATOR: &str = "__";

/// Source page reference. Record files carry either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Page {
    Number(u32),
    Label(String),
}

impl Default for Page {
    fn default() -> Self {
        Self::Label(String::new())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Label(s) => f.write_str(s),
        }
    }
}

/// One medication/population pairing as loaded from the record file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolRecord {
    #[serde(default)]
    pub drug: String,
    #[serde(default)]
    pub population: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default)]
    pub page: Page,
}

impl ProtocolRecord {
    /// Identity key for this record.
    pub fn id(&self) -> CardId {
        CardId::new(&self.drug, &self.population)
    }

    /// Markup to display for this record: the stored html, or the escaped text.
    pub fn markup(&self) -> String {
        match self.html.as_deref() {
            Some(html) if !html.is_empty() => html.to_string(),
            _ => crate::markup::escape_html(&self.text),
        }
    }
}

/// Durable card identity: normalized drug and population joined by
/// [`CARD_ID_SEPARATOR`]. Persisted by downstream stores, so the derivation
/// must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(drug: &str, population: &str) -> Self {
        Self(format!(
            "{}{}{}",
            normalize(drug),
            CARD_ID_SEPARATOR,
            normalize(population)
        ))
    }

    /// Rebuild an id from a key such as a URL path segment. Both halves are
    /// re-normalized, so `Atropine__Adult` and `atropine__adult` are the same
    /// card.
    pub fn from_key(key: &str) -> Self {
        match key.split_once(CARD_ID_SEPARATOR) {
            Some((drug, population)) => Self::new(drug, population),
            None => Self(normalize(key)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which pattern strategy produced a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// `Title - Adult|Pediatric`
    Header,
    /// `Drug, <dose>`
    Dose,
}

/// Detected start of a medication sub-block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentBoundary {
    /// Byte offset into the segmented text.
    pub offset: usize,
    /// Byte length of the matched label span in the source text.
    pub len: usize,
    pub label: String,
    pub kind: BoundaryKind,
}

/// One medication's title plus its ordered bullet list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub bullets: Vec<String>,
}

/// Output of the reformatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub blocks: Vec<Block>,
}

/// Result of formatting a protocol fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Formatted {
    /// Input already looked like a structured protocol list; returned as-is.
    AlreadyStructured(String),
    Parsed(FormattedDocument),
}

impl Formatted {
    /// Serialize to markup.
    pub fn into_markup(self) -> String {
        match self {
            Self::AlreadyStructured(markup) => markup,
            Self::Parsed(doc) => crate::markup::render(&doc),
        }
    }

    /// The parsed document, if the input was re-parsed.
    pub fn document(&self) -> Option<&FormattedDocument> {
        match self {
            Self::Parsed(doc) => Some(doc),
            Self::AlreadyStructured(_) => None,
        }
    }
}

/// Study mode that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Flashcards,
    Mcq,
    Typed,
    Case,
}

/// Outcome recorded in study history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Missed,
    Unmarked,
    Correct,
    Wrong,
    Revealed,
    SelfCorrect,
    SelfWrong,
}

impl Outcome {
    /// Whether this outcome should add the card to the missed set,
    /// remove it, or leave it alone.
    pub fn missed_effect(self) -> Option<bool> {
        match self {
            Self::Missed | Self::Wrong | Self::SelfWrong => Some(true),
            Self::Unmarked | Self::Correct | Self::SelfCorrect => Some(false),
            Self::Revealed => None,
        }
    }
}

/// One study history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ts: DateTime<Utc>,
    pub mode: StudyMode,
    pub drug: String,
    pub population: String,
    pub result: Outcome,
}

impl HistoryEntry {
    pub fn card_id(&self) -> CardId {
        CardId::new(&self.drug, &self.population)
    }
}
