use super::{literal_word, whole_word};
use crate::core::models::candidate::{WaterModelCategory, WaterModelMatch};
use crate::core::text::vocabulary::{
    EXPLICIT_WATER_KEYWORDS, EXPLICIT_WATER_MODELS, IMPLICIT_WATER_KEYWORDS,
    IMPLICIT_WATER_MODELS, WATER_CONTEXT_KEYWORDS, is_generic_water_term,
};
use once_cell::sync::Lazy;
use regex::Regex;

struct TermPattern {
    term: &'static str,
    category: WaterModelCategory,
    regex: Regex,
}

static WATER_CONTEXT: Lazy<Regex> = Lazy::new(|| {
    let variants: Vec<String> = WATER_CONTEXT_KEYWORDS
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect();
    whole_word(&variants)
});

// Specific models first (explicit, then implicit), then the generic keyword fallbacks.
static MODEL_PATTERNS: Lazy<Vec<TermPattern>> = Lazy::new(|| {
    let explicit = EXPLICIT_WATER_MODELS
        .iter()
        .map(|term| (*term, WaterModelCategory::Explicit));
    let implicit = IMPLICIT_WATER_MODELS
        .iter()
        .map(|term| (*term, WaterModelCategory::Implicit));
    explicit
        .chain(implicit)
        .map(|(term, category)| TermPattern {
            term,
            category,
            regex: spelling_variants(term),
        })
        .collect()
});

static KEYWORD_PATTERNS: Lazy<Vec<TermPattern>> = Lazy::new(|| {
    let explicit = EXPLICIT_WATER_KEYWORDS
        .iter()
        .map(|term| (*term, WaterModelCategory::Explicit));
    let implicit = IMPLICIT_WATER_KEYWORDS
        .iter()
        .map(|term| (*term, WaterModelCategory::Implicit));
    explicit
        .chain(implicit)
        .map(|(term, category)| TermPattern {
            term,
            category,
            regex: literal_word(term),
        })
        .collect()
});

/// Multi-word terms also match hyphenated and whitespace-flexible spellings
/// ("Coarse-Grained-Solvent", "Linear  PB", "LinearPB").
fn spelling_variants(term: &str) -> Regex {
    let mut variants = vec![regex::escape(term)];
    if term.contains(' ') {
        variants.push(regex::escape(&term.replace(' ', "-")));
        variants.push(
            term.split(' ')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s*"),
        );
    }
    whole_word(&variants)
}

/// Whether `sentence` talks about water or solvent at all.
pub fn has_water_context(sentence: &str) -> bool {
    WATER_CONTEXT.is_match(sentence)
}

/// Recognizes the water model used in `sentence`.
///
/// Nothing is reported unless the sentence mentions water or solvent. A vocabulary model that
/// is itself a generic phrase ("Explicit water") yields only its category, as does a match on
/// the generic keyword lists.
pub fn find_water_model(sentence: &str) -> Option<WaterModelMatch> {
    if !has_water_context(sentence) {
        return None;
    }

    if let Some(pattern) = MODEL_PATTERNS.iter().find(|p| p.regex.is_match(sentence)) {
        let model = if is_generic_water_term(pattern.category, pattern.term) {
            None
        } else {
            Some(pattern.term.to_string())
        };
        return Some(WaterModelMatch {
            category: pattern.category,
            model,
        });
    }

    KEYWORD_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(sentence))
        .map(|pattern| WaterModelMatch {
            category: pattern.category,
            model: None,
        })
}
