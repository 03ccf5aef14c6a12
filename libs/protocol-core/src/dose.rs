//! Dosage token highlighting.

use regex::Regex;
use std::sync::LazyLock;

/// Number, optional decimal, unit, optional `/kg`. Longer units are listed
/// before their prefixes so `gm` is not cut short at `g`.
static DOSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:mcg|meq|units|unit|gm|mg|ml|cc|iu|g)(?:\s*/\s*kg)?")
        .expect("valid dose regex")
});

pub const EMPHASIS_OPEN: &str = "<b>";
pub const EMPHASIS_CLOSE: &str = "</b>";

/// Wrap every numeric-quantity-plus-unit token in an emphasis marker.
pub fn highlight_doses(text: &str) -> String {
    DOSE_REGEX
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!("{}{}{}", EMPHASIS_OPEN, &caps[0], EMPHASIS_CLOSE)
        })
        .into_owned()
}

/// Dosage tokens in `text`, in order.
pub fn dose_tokens(text: &str) -> Vec<&str> {
    DOSE_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}
