//! Pure recognizers operating on sentence text.
//!
//! - [`protein`] - Simulated-structure and experimental identifier mentions
//! - [`software`] - Simulation packages with an optional version
//! - [`water`] - Water models and their explicit/implicit category
//!
//! All matching is case-insensitive. Vocabulary terms are matched as whole words and reported
//! with their canonical vocabulary spelling, not the spelling found in the text.

pub mod protein;
pub mod software;
pub mod water;

use regex::Regex;

/// Case-insensitive whole-word pattern matching any of the already-escaped `variants`.
pub(crate) fn whole_word(variants: &[String]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", variants.join("|")))
        .expect("escaped vocabulary alternation is a valid pattern")
}

/// Whole-word pattern for a single literal vocabulary term.
pub(crate) fn literal_word(term: &str) -> Regex {
    whole_word(&[regex::escape(term)])
}
