use crate::core::models::mention::ProteinMention;
use crate::core::models::sentence::Document;
use crate::core::text::vocabulary::{SIMULATION_TOOLS, has_identifier_context};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;
use tracing::{debug, warn};

/// The phrasings an experimental identifier can be found in, in priority order.
///
/// When two phrasings match at the same position the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentifierPattern {
    CodeList,       // "PDB ID codes 2FJ3, 2JOM and 2JOH"
    AccessionCode,  // "PDB code: 1HJN", "accession code 1ABC"
    Parenthesized,  // "(PDB 1ABC)"
    DataBankPrefix, // "Protein Data Bank: 1ABC", "PDB 1ABC"
    EntryOrId,      // "PDB entry 1ABC", "ID 1ABC"
    SourceSuffix,   // "1ABC (PDB)", "1ABC from PDB"
    CodeSemicolon,  // "PDB code 1ABC;"
    DataBankFile,   // "Protein Data Bank file 1ABC"
    LoosePrefix,    // "PDB ... 1ABC"
    NearStructure,  // "1ABC ... structure"
}

/// One position in a sentence where an identifier phrasing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMatch<'s> {
    pub pattern: IdentifierPattern,
    pub start: usize,
    pub end: usize,
    pub codes: Vec<&'s str>, // Raw codes as written, not yet validated
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    None,
    NoLetterBefore, // The match must not continue a word
    StructureAhead, // "structure" or "coordinates" must follow on the same line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Single,   // Group 1 is the code
    List,     // Group 1 is a separated list of codes
    CodeOnly, // Group 1 is the code and the match ends with it
}

struct IdentifierRule {
    pattern: IdentifierPattern,
    regex: Regex,
    guard: Guard,
    capture: Capture,
}

impl IdentifierRule {
    fn new(pattern: IdentifierPattern, source: &str, guard: Guard, capture: Capture) -> Self {
        Self {
            pattern,
            regex: Regex::new(&format!("(?i){}", source))
                .expect("identifier pattern is a valid regex"),
            guard,
            capture,
        }
    }

    /// The first admissible match starting at or after `from`.
    fn find_from<'s>(
        &self,
        sentence: &SentenceLayout<'s>,
        from: usize,
    ) -> Option<IdentifierMatch<'s>> {
        let text = sentence.text;
        let mut at = from;
        while at <= text.len() {
            let caps = self.regex.captures_at(text, at)?;
            let whole = caps.get(0)?;
            if self.admits(sentence, &caps) {
                return self.build(&caps);
            }
            at = next_char_boundary(text, whole.start());
        }
        None
    }

    fn admits(&self, sentence: &SentenceLayout<'_>, caps: &Captures<'_>) -> bool {
        let Some(whole) = caps.get(0) else {
            return false;
        };
        match self.guard {
            Guard::None => true,
            Guard::NoLetterBefore => sentence.text[..whole.start()]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_ascii_alphabetic()),
            Guard::StructureAhead => sentence.structure_ahead(whole.end()),
        }
    }

    fn build<'s>(&self, caps: &Captures<'s>) -> Option<IdentifierMatch<'s>> {
        let whole = caps.get(0)?;
        let group = caps.get(1)?;
        let (end, codes) = match self.capture {
            Capture::Single => (whole.end(), vec![group.as_str()]),
            Capture::CodeOnly => (group.end(), vec![group.as_str()]),
            Capture::List => (
                whole.end(),
                CODE.find_iter(group.as_str()).map(|m| m.as_str()).collect(),
            ),
        };
        Some(IdentifierMatch {
            pattern: self.pattern,
            start: whole.start(),
            end,
            codes,
        })
    }
}

/// Offsets of a sentence computed once per scan, so guards answer without re-searching.
struct SentenceLayout<'s> {
    text: &'s str,
    structure_starts: Vec<usize>, // Every start of a structure keyword, overlapping ones included
    line_breaks: Vec<usize>,
}

impl<'s> SentenceLayout<'s> {
    fn new(text: &'s str) -> Self {
        let mut structure_starts = Vec::new();
        let mut at = 0;
        while at <= text.len() {
            let Some(found) = STRUCTURE_AHEAD.find_at(text, at) else {
                break;
            };
            structure_starts.push(found.start());
            at = next_char_boundary(text, found.start());
        }
        let line_breaks = text.match_indices('\n').map(|(i, _)| i).collect();
        Self {
            text,
            structure_starts,
            line_breaks,
        }
    }

    /// Whether a structure keyword starts at or after `from` on the same line.
    fn structure_ahead(&self, from: usize) -> bool {
        let line_end = self
            .line_breaks
            .get(self.line_breaks.partition_point(|&b| b < from))
            .copied()
            .unwrap_or(self.text.len());
        self.structure_starts
            .get(self.structure_starts.partition_point(|&s| s < from))
            .is_some_and(|&s| s < line_end)
    }
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    index + text[index..].chars().next().map_or(1, char::len_utf8)
}

static CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d[A-Z0-9]{3}").expect("code pattern is valid"));

static STRUCTURE_AHEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)structure|coordinates").expect("structure pattern is valid")
});

static SIMULATION_TOOL: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<String> = SIMULATION_TOOLS.iter().map(|n| regex::escape(n)).collect();
    super::whole_word(&names)
});

static RULES: Lazy<Vec<IdentifierRule>> = Lazy::new(|| {
    use Capture::*;
    use IdentifierPattern::*;
    vec![
        IdentifierRule::new(
            CodeList,
            r"\b(?:PDB\s+(?:ID\s+)?codes?|IDs?)\s+((?:\d[A-Z0-9]{3}\s*(?:,|and|&)?\s*)+)\b",
            Guard::None,
            List,
        ),
        IdentifierRule::new(
            AccessionCode,
            r"(?:PDB\s+code|accession\s+code)\D*?(\d[A-Z0-9]{3})\b",
            Guard::NoLetterBefore,
            Single,
        ),
        IdentifierRule::new(
            Parenthesized,
            r"\(PDB\s+(\d[A-Z0-9]{3})\)",
            Guard::None,
            Single,
        ),
        IdentifierRule::new(
            DataBankPrefix,
            r"(?:Protein\s+Data\s+Bank|PDB)[^a-zA-Z0-9]*?(\d[A-Z0-9]{3})\b",
            Guard::NoLetterBefore,
            Single,
        ),
        IdentifierRule::new(
            EntryOrId,
            r"(?:PDB\s+entry|accession\s+code|ID)\D*?(\d[A-Z0-9]{3})\b",
            Guard::NoLetterBefore,
            Single,
        ),
        IdentifierRule::new(
            SourceSuffix,
            r"\b(\d[A-Z0-9]{3})\s*(?:\(PDB\)|from\s+PDB)",
            Guard::None,
            CodeOnly,
        ),
        IdentifierRule::new(
            CodeSemicolon,
            r"PDB\s+code\s*(\d[A-Z0-9]{3})\s*;",
            Guard::None,
            Single,
        ),
        IdentifierRule::new(
            DataBankFile,
            r"(?:Protein\s+Data\s+Bank\s+file|PDB\s+file)\s*(\d[A-Z0-9]{3})\b",
            Guard::None,
            Single,
        ),
        IdentifierRule::new(
            LoosePrefix,
            r"(?:PDB\s*(?:code)?|accession\s+code)\D*?(\d[A-Z0-9]{3})\b",
            Guard::NoLetterBefore,
            Single,
        ),
        IdentifierRule::new(
            NearStructure,
            r"\b(\d[A-Z0-9]{3})\b",
            Guard::StructureAhead,
            Single,
        ),
    ]
});

/// Scans `sentence` left to right for identifier phrasings.
///
/// At each step the match with the leftmost start wins, ties going to the higher-priority
/// pattern, and scanning resumes at its end. Matches never overlap.
pub fn scan_identifiers(sentence: &str) -> Vec<IdentifierMatch<'_>> {
    let layout = SentenceLayout::new(sentence);
    // Each rule's earliest admissible match at or after the scan position. A rule is queried
    // again only once the position moves past its pending match; `None` means exhausted.
    let mut pending: Vec<Option<IdentifierMatch<'_>>> = RULES
        .iter()
        .map(|rule| rule.find_from(&layout, 0))
        .collect();

    let mut matches = Vec::new();
    loop {
        let next = pending
            .iter()
            .enumerate()
            .filter_map(|(slot, m)| m.as_ref().map(|m| (slot, (m.start, m.pattern))))
            .min_by_key(|&(_, key)| key)
            .map(|(slot, _)| slot);
        let Some(found) = next.and_then(|slot| pending[slot].take()) else {
            break;
        };
        let position = found.end.max(next_char_boundary(sentence, found.start));
        for (rule, slot) in RULES.iter().zip(pending.iter_mut()) {
            let stale = match slot {
                Some(m) => m.start < position,
                None => rule.pattern == found.pattern,
            };
            if stale {
                *slot = rule.find_from(&layout, position);
            }
        }
        matches.push(found);
    }
    matches
}

/// Why a syntactically matched code was not accepted as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NumericSuffix,  // None of the last three characters is a letter
    MissingKeyword, // The sentence never mentions a structure database
}

/// Validates one raw code against the sentence hosting it, returning the normalized identifier.
pub fn validate_code(code: &str, sentence: &str) -> Result<String, Rejection> {
    let suffix_has_letter = code
        .chars()
        .rev()
        .take(3)
        .any(|c| c.is_ascii_alphabetic());
    if !suffix_has_letter {
        return Err(Rejection::NumericSuffix);
    }
    if !has_identifier_context(sentence) {
        return Err(Rejection::MissingKeyword);
    }
    Ok(code.to_uppercase())
}

/// Finds mentions of structure-prediction tools (e.g., "AlphaFold").
///
/// Every occurrence yields one mention whose `id` is the name as written. Its sentence is the
/// first sentence in the document containing that literal text.
pub fn extract_simulated(document: &Document) -> Vec<ProteinMention> {
    let mut mentions = Vec::new();
    for sentence in document {
        for found in SIMULATION_TOOL.find_iter(&sentence.text) {
            let name = found.as_str();
            let Some(index) = document.position_of(name) else {
                warn!(name, "Simulation tool name has no host sentence; skipping.");
                continue;
            };
            mentions.push(ProteinMention::simulated(name, index));
        }
    }
    mentions
}

/// Finds validated experimental identifiers, one mention per distinct code per sentence.
pub fn extract_experimental(document: &Document) -> Vec<ProteinMention> {
    let mut mentions = Vec::new();
    for sentence in document {
        let mut accepted = HashSet::new();
        for found in scan_identifiers(&sentence.text) {
            for code in found.codes {
                match validate_code(code, &sentence.text) {
                    Ok(id) => {
                        if accepted.insert(id.clone()) {
                            mentions.push(ProteinMention::experimental(id, sentence.index));
                        }
                    }
                    Err(reason) => debug!(
                        code,
                        sentence = sentence.index,
                        pattern = ?found.pattern,
                        ?reason,
                        "Rejected identifier candidate."
                    ),
                }
            }
        }
    }
    mentions
}

/// All protein mentions of `document` in document order.
///
/// Within one sentence, simulated mentions precede experimental ones.
pub fn extract_mentions(document: &Document) -> Vec<ProteinMention> {
    let mut mentions = extract_simulated(document);
    mentions.extend(extract_experimental(document));
    mentions.sort_by_key(|mention| mention.sentence_index);
    mentions
}
