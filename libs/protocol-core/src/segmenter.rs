//! Structural segmentation of protocol text.
//!
//! Converts a blob of loosely-delimited protocol text into a header plus
//! one titled bullet list per medication:
//!
//! 1. Split off a leading `Condition:` header.
//! 2. Find medication boundaries: `Title - Adult|Pediatric` headers first,
//!    then `Drug, <dose>` patterns, else fall back to sentence splitting.
//! 3. Slice the text between boundaries, strip each title from its chunk,
//!    split the body into clauses and merge short fragments.
//! 4. Escape and highlight dosage tokens in every bullet.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

use crate::dose::highlight_doses;
use crate::glue::repair_glue;
use crate::markup::{escape_html, markup_to_text};
use crate::types::{Block, BoundaryKind, Formatted, FormattedDocument, SegmentBoundary};

/// A colon must sit strictly between these char offsets to mark a header.
pub const HEADER_COLON_MIN: usize = 10;
pub const HEADER_COLON_MAX: usize = 120;

/// Fragments shorter than this are merged into the previous bullet.
pub const MIN_BULLET_CHARS: usize = 18;

static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"([A-Z][A-Za-z0-9/ ]+(?:\s*\([^)]+\))?(?:\s+[A-Z][A-Za-z0-9/ -]+?)*)",
        r"\s*-\s*(Adult|Pediatric)\b",
    ))
    .expect("valid header regex")
});

static DRUG_DOSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z]{3,}(?:\s*\([^)]+\))?)\s*,\s*\d").expect("valid drug dose regex")
});

static AND_CONTINUATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+and\s+").expect("valid and-continuation regex"));

static DRUG_DOSE_AHEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]{3,}\s*,\s*\d").expect("valid drug dose lookahead regex"));

/// Medication boundaries found by the first strategy that produced any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundaries {
    Header(Vec<SegmentBoundary>),
    Dose(Vec<SegmentBoundary>),
    None,
}

impl Boundaries {
    /// Try header patterns, then drug-dose patterns.
    pub fn detect(text: &str) -> Self {
        let headers = scan_headers(text);
        if !headers.is_empty() {
            debug!(count = headers.len(), "segmenting on medication headers");
            return Self::Header(headers);
        }

        let doses = scan_drug_doses(text);
        if !doses.is_empty() {
            debug!(count = doses.len(), "segmenting on drug-dose patterns");
            return Self::Dose(doses);
        }

        debug!("no medication boundaries, falling back to sentence split");
        Self::None
    }

    /// Boundaries sorted by offset; empty for [`Boundaries::None`].
    pub fn into_sorted(self) -> Vec<SegmentBoundary> {
        let mut boundaries = match self {
            Self::Header(b) | Self::Dose(b) => b,
            Self::None => Vec::new(),
        };
        boundaries.sort_by_key(|b| b.offset);
        boundaries
    }
}

fn scan_headers(text: &str) -> Vec<SegmentBoundary> {
    HEADER_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(SegmentBoundary {
                offset: whole.start(),
                len: whole.len(),
                label: format!("{} - {}", caps[1].trim(), &caps[2]),
                kind: BoundaryKind::Header,
            })
        })
        .collect()
}

fn scan_drug_doses(text: &str) -> Vec<SegmentBoundary> {
    DRUG_DOSE_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let drug = caps.get(1)?;
            Some(SegmentBoundary {
                offset: drug.start(),
                len: drug.len(),
                label: drug.as_str().trim().to_string(),
                kind: BoundaryKind::Dose,
            })
        })
        .collect()
}

/// Whether the input already looks like a structured protocol list.
///
/// This is a plain substring check on `ul` and `proto`, so ordinary text
/// such as "check pulse per protocol" also passes it.
pub fn is_already_structured(raw_markup: &str) -> bool {
    raw_markup.contains("ul") && raw_markup.contains("proto")
}

/// Reformat a protocol markup fragment.
pub fn format_protocol(raw_markup: &str) -> Formatted {
    if raw_markup.is_empty() {
        return Formatted::Parsed(FormattedDocument::default());
    }
    if is_already_structured(raw_markup) {
        return Formatted::AlreadyStructured(raw_markup.to_string());
    }

    let text = repair_glue(&markup_to_text(raw_markup));
    Formatted::Parsed(parse_text(&text))
}

/// Reformat a protocol markup fragment and serialize the result.
pub fn format_protocol_markup(raw_markup: &str) -> String {
    format_protocol(raw_markup).into_markup()
}

/// Segment already-extracted, glue-repaired text.
pub fn parse_text(text: &str) -> FormattedDocument {
    let (header, body) = split_header(text);
    let header = header.map(str::to_string);

    let boundaries = Boundaries::detect(body).into_sorted();
    if boundaries.is_empty() {
        let bullets = split_fragments(body, false)
            .into_iter()
            .map(emphasize)
            .collect();
        return FormattedDocument {
            header,
            blocks: vec![Block { title: None, bullets }],
        };
    }

    let blocks = chunk_spans(body, &boundaries)
        .into_iter()
        .zip(&boundaries)
        .map(|(span, boundary)| block_from_chunk(&body[span], boundary))
        .collect();

    FormattedDocument { header, blocks }
}

/// Split a leading `Header:` off the text.
///
/// Only the first colon is considered, and only when its char offset lies
/// strictly between [`HEADER_COLON_MIN`] and [`HEADER_COLON_MAX`].
pub fn split_header(text: &str) -> (Option<&str>, &str) {
    let Some(idx) = text.find(':') else {
        return (None, text);
    };

    let offset = text[..idx].chars().count();
    if offset <= HEADER_COLON_MIN || offset >= HEADER_COLON_MAX {
        return (None, text);
    }

    let header = text[..idx].trim();
    let rest = text[idx + 1..].trim();
    if header.is_empty() {
        (None, rest)
    } else {
        (Some(header), rest)
    }
}

/// Byte ranges of each boundary's chunk: from its offset to the next
/// boundary's offset, the last one running to the end of `text`.
pub fn chunk_spans(text: &str, boundaries: &[SegmentBoundary]) -> Vec<Range<usize>> {
    boundaries
        .iter()
        .enumerate()
        .map(|(i, boundary)| {
            let end = boundaries.get(i + 1).map_or(text.len(), |next| next.offset);
            boundary.offset..end
        })
        .collect()
}

fn block_from_chunk(chunk: &str, boundary: &SegmentBoundary) -> Block {
    let chunk = chunk.trim();
    let body = match boundary.kind {
        BoundaryKind::Header => chunk
            .strip_prefix(boundary.label.as_str())
            .or_else(|| chunk.get(boundary.len..))
            .unwrap_or(chunk),
        BoundaryKind::Dose => strip_drug_prefix(chunk, &boundary.label),
    };

    let body = repair_glue(body);
    let bullets = merge_fragments(split_fragments(&body, true))
        .iter()
        .map(|bullet| emphasize(bullet))
        .collect();

    Block {
        title: Some(boundary.label.clone()),
        bullets,
    }
}

/// Remove a leading `"<drug>,"` (case-insensitive) so the dose starts the body.
fn strip_drug_prefix<'a>(chunk: &'a str, drug: &str) -> &'a str {
    let pattern = format!(r"(?i)^{}\s*,\s*", regex::escape(drug));
    match Regex::new(&pattern) {
        Ok(prefix) => match prefix.find(chunk) {
            Some(m) => &chunk[m.end()..],
            None => chunk,
        },
        Err(_) => chunk,
    }
}

fn emphasize(fragment: &str) -> String {
    highlight_doses(&escape_html(fragment))
}

/// Split text into trimmed, non-empty clause fragments.
///
/// Delimiters are whitespace following a period, a semicolon followed by
/// whitespace, and (with `and_continuations`) ` and ` when the next words
/// start a new `Drug, <dose>` pattern.
pub fn split_fragments(text: &str, and_continuations: bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < text.len() {
        match delimiter_end(text, pos, and_continuations) {
            Some(end) => {
                pieces.push(&text[start..pos]);
                start = end;
                pos = end;
            }
            None => pos += text[pos..].chars().next().map_or(1, char::len_utf8),
        }
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// End offset of a delimiter starting at `pos`, if one does.
fn delimiter_end(text: &str, pos: usize, and_continuations: bool) -> Option<usize> {
    let rest = &text[pos..];

    if text[..pos].ends_with('.') {
        let ws = leading_whitespace(rest);
        if ws > 0 {
            return Some(pos + ws);
        }
    }

    if let Some(after) = rest.strip_prefix(';') {
        let ws = leading_whitespace(after);
        if ws > 0 {
            return Some(pos + 1 + ws);
        }
    }

    if and_continuations {
        if let Some(m) = AND_CONTINUATION_REGEX.find(rest) {
            if DRUG_DOSE_AHEAD_REGEX.is_match(&rest[m.end()..]) {
                return Some(pos + m.end());
            }
        }
    }

    None
}

fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Merge continuation fragments into the previous bullet.
///
/// A fragment starting with a lowercase letter or shorter than
/// [`MIN_BULLET_CHARS`] is appended to the previous bullet. Short but
/// meaningful bullets get folded in too.
pub fn merge_fragments(fragments: Vec<&str>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for fragment in fragments {
        let continues = fragment.starts_with(|c: char| c.is_ascii_lowercase())
            || fragment.chars().count() < MIN_BULLET_CHARS;
        match merged.last_mut() {
            Some(previous) if continues => {
                previous.push(' ');
                previous.push_str(fragment);
            }
            _ => merged.push(fragment.to_string()),
        }
    }
    merged
}
