//! Drug-name redaction for quiz prompts.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::glue::collapse_whitespace;

/// Replacement for every redacted drug-name occurrence.
pub const REDACTION_PLACEHOLDER: &str = r#"<span class="redact">_____</span>"#;

/// Variants shorter than this are never redacted.
pub const MIN_VARIANT_CHARS: usize = 4;

/// Generic descriptors that say nothing about which drug it is.
const DESCRIPTOR_STOPLIST: [&str; 10] = [
    "solution",
    "mdi",
    "aerosolized",
    "metered-dose",
    "inhaler",
    "adult",
    "pediatric",
    "als",
    "lals",
    "bls",
];

/// `Name (Alt)`; whatever follows the closing parenthesis is handled separately.
static PARENTHETICAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\(([^)]*)\)").expect("valid parenthetical regex"));

fn is_descriptor(word: &str) -> bool {
    DESCRIPTOR_STOPLIST
        .iter()
        .any(|stop| stop.eq_ignore_ascii_case(word.trim()))
}

/// Drop trailing descriptor words: "Albuterol Aerosolized Solution" -> "Albuterol".
fn strip_trailing_descriptors(seed: &str) -> String {
    let mut words: Vec<&str> = seed.split_whitespace().collect();
    while words.last().is_some_and(|w| is_descriptor(w)) {
        words.pop();
    }
    words.join(" ")
}

/// Text after `Name (Alt)`: "/Lorazepam" names another drug, while
/// "Aerosolized Solution" is only descriptors and yields nothing.
fn trailing_alternates(tail: &str) -> String {
    let tail = tail.trim_start_matches(|c: char| c == '/' || c == ',' || c.is_whitespace());
    strip_trailing_descriptors(tail)
}

/// Textual forms of a drug label worth redacting, longest first.
pub fn variants_of(drug_label: &str) -> Vec<String> {
    let main = drug_label.split(" - ").next().unwrap_or_default().trim();
    if main.is_empty() {
        return Vec::new();
    }

    let seeds: Vec<String> = match PARENTHETICAL_REGEX.captures(main) {
        Some(caps) => {
            let end = caps.get(0).map_or(main.len(), |m| m.end());
            vec![
                caps.get(1).map_or("", |m| m.as_str()).to_string(),
                caps.get(2).map_or("", |m| m.as_str()).to_string(),
                trailing_alternates(&main[end..]),
            ]
        }
        None => vec![main.to_string()],
    };

    let mut found = BTreeSet::new();
    for seed in &seeds {
        let stripped = strip_trailing_descriptors(seed);
        for candidate in [seed.as_str(), stripped.as_str()] {
            found.insert(collapse_whitespace(candidate));
            for piece in candidate.split('/').chain(candidate.split(',')) {
                found.insert(collapse_whitespace(piece));
            }
        }
    }

    let mut variants: Vec<String> = found
        .into_iter()
        .filter(|v| v.chars().count() >= MIN_VARIANT_CHARS)
        .filter(|v| !is_descriptor(v))
        .collect();
    variants.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    variants
}

/// Blank out every whole-word, case-insensitive occurrence of the drug's
/// variants. Returns the input unchanged when no variant survives filtering.
pub fn redact(markup: &str, drug_label: &str) -> String {
    let mut out = markup.to_string();
    for variant in variants_of(drug_label) {
        let Ok(pattern) = whole_word_pattern(&variant) else {
            continue;
        };
        out = pattern
            .replace_all(&out, regex::NoExpand(REDACTION_PLACEHOLDER))
            .into_owned();
    }
    out
}

fn whole_word_pattern(variant: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(variant)))
}
