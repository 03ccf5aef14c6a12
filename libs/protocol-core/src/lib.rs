//! Core protocol review library shared by the backend and other frontends.
//!
//! Provides:
//! - Glue repair for PDF-extracted protocol text
//! - Structural segmentation into titled, bulleted medication blocks
//! - Dosage token highlighting
//! - Drug-name redaction for quiz prompts
//! - Record search and quiz assembly (multiple choice, typed recall, case prompts)
//! - Shared types (ProtocolRecord, CardId, FormattedDocument, etc.)

pub mod dose;
pub mod error;
pub mod glue;
pub mod markup;
pub mod quiz;
pub mod redact;
pub mod search;
pub mod segmenter;
pub mod types;

pub use dose::highlight_doses;
pub use error::{QuizError, Result};
pub use glue::{repair_glue, GlueRepair, GlueRule};
pub use markup::{escape_html, markup_to_text, render};
pub use quiz::{ChoiceQuestion, RecallPrompt, CASE_PROMPTS};
pub use redact::{redact, variants_of, REDACTION_PLACEHOLDER};
pub use search::{filter_records, normalize};
pub use segmenter::{format_protocol, format_protocol_markup, Boundaries};
pub use types::{
    Block, BoundaryKind, CardId, Formatted, FormattedDocument, HistoryEntry, Outcome, Page,
    ProtocolRecord, SegmentBoundary, StudyMode,
};
