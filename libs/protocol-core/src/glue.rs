//! Repair of text-extraction glue artifacts.
//!
//! PDF extraction drops spaces between some token pairs and splits others.
//! The repairs run in table order, then whitespace is collapsed, so patterns
//! can be written against the irregular extracted spacing.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static DEFAULT_REPAIR: LazyLock<GlueRepair> = LazyLock::new(GlueRepair::default);

/// A single substitution in the repair table.
#[derive(Debug, Clone)]
pub enum GlueRule {
    /// Replace every literal occurrence.
    Literal {
        from: &'static str,
        to: &'static str,
    },
    /// Replace every regex match.
    Pattern { pattern: Regex, to: &'static str },
}

impl GlueRule {
    pub fn literal(from: &'static str, to: &'static str) -> Self {
        Self::Literal { from, to }
    }

    /// Panics if `pattern` is invalid; tables are built from constants.
    pub fn pattern(pattern: &str, to: &'static str) -> Self {
        Self::Pattern {
            pattern: Regex::new(pattern).expect("valid glue pattern"),
            to,
        }
    }

    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::Literal { from, to } => {
                if text.contains(from) {
                    Cow::Owned(text.replace(from, to))
                } else {
                    Cow::Borrowed(text)
                }
            }
            Self::Pattern { pattern, to } => pattern.replace_all(text, regex::NoExpand(to)),
        }
    }
}

/// Ordered table of glue repairs.
#[derive(Debug, Clone)]
pub struct GlueRepair {
    rules: Vec<GlueRule>,
}

impl Default for GlueRepair {
    fn default() -> Self {
        Self::new(vec![
            GlueRule::literal("complexSVT", "complex SVT"),
            GlueRule::literal("Widecomplex", "Wide complex"),
            GlueRule::literal("DoseInhaler", "Dose Inhaler"),
            GlueRule::literal("Metered-DoseInhaler", "Metered-Dose Inhaler"),
            GlueRule::literal("AlbuterolMDI", "Albuterol MDI"),
            GlueRule::pattern(r"Soluti\s+on", "Solution"),
            GlueRule::pattern(r"(?i)Mayrepe\s*at", "May repeat"),
        ])
    }
}

impl GlueRepair {
    pub fn new(rules: Vec<GlueRule>) -> Self {
        Self { rules }
    }

    /// Apply every rule in order, then collapse whitespace and trim.
    pub fn repair(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for rule in &self.rules {
            text = rule.apply(&text).into_owned();
        }
        collapse_whitespace(&text)
    }
}

/// Repair `raw` with the default table.
pub fn repair_glue(raw: &str) -> String {
    DEFAULT_REPAIR.repair(raw)
}

/// Collapse whitespace runs to a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
