//! The port through which the engine consults an external decision service.
//!
//! The engine sends one [`OracleRequest`] per role (software, water) per mention, listing the
//! filtered candidates in the exact order it will later index into. The oracle answers with
//! 1-based indices into that list. The engine never second-guesses *which* candidates were
//! chosen, but every answer is checked for structural well-formedness before use.

use crate::core::models::candidate::{Candidate, Direction};
use crate::core::models::mention::ProteinMention;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleRole {
    Software,
    Water,
}

impl OracleRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleRole::Software => "software",
            OracleRole::Water => "water",
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            OracleRole::Software => "software",
            OracleRole::Water => "water model",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            OracleRole::Software => "Software matches (ordered by distance):",
            OracleRole::Water => "Water model matches (ordered by distance):",
        }
    }
}

impl fmt::Display for OracleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Oracle could not be reached: {0}")]
    Transport(String),

    #[error("Oracle answer is malformed: {0}")]
    Contract(String),
}

/// One entry of the candidate list shown to the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub index: usize, // 1-based, as the oracle must answer
    pub label: String,
    pub distance: usize,
    pub direction: Direction,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleRequest {
    pub role: OracleRole,
    pub subject_id: String,
    pub subject_sentence: String,
    pub sentence_position: usize,
    pub candidates: Vec<CandidateSummary>,
}

impl OracleRequest {
    pub fn new(
        role: OracleRole,
        mention: &ProteinMention,
        sentence: &str,
        candidates: &[Candidate],
    ) -> Self {
        let candidates = candidates
            .iter()
            .enumerate()
            .map(|(i, candidate)| CandidateSummary {
                index: i + 1,
                label: candidate.label(),
                distance: candidate.distance,
                direction: candidate.direction,
                context: candidate.context.clone(),
            })
            .collect();
        Self {
            role,
            subject_id: mention.id.clone(),
            subject_sentence: sentence.to_string(),
            sentence_position: mention.sentence_index,
            candidates,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Renders the request as the plain-text prompt understood by the chat-model oracles.
    pub fn render_prompt(&self) -> String {
        let mut prompt = String::new();
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "PDB ID: {}", self.subject_id);
        let _ = writeln!(prompt, "Protein sentence: {}", self.subject_sentence);
        let _ = writeln!(prompt, "Protein sentence position: {}", self.sentence_position);
        let _ = writeln!(
            prompt,
            "Number of {} matches: {}",
            self.role.subject(),
            self.len()
        );
        let _ = writeln!(prompt, "{}", self.role.heading());
        for candidate in &self.candidates {
            let _ = writeln!(
                prompt,
                "- {}, distance: {} {}",
                candidate.label, candidate.distance, candidate.direction
            );
            let _ = writeln!(prompt, "  Context: {}", candidate.context);
            let _ = writeln!(prompt);
        }
        prompt
    }
}

/// The oracle's answer: 1-based indices into the request's candidate list, in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResponse {
    pub selected_indices: Vec<i64>,
}

impl OracleResponse {
    pub fn new(indices: impl IntoIterator<Item = i64>) -> Self {
        Self {
            selected_indices: indices.into_iter().collect(),
        }
    }

    /// Reads the index list stored under `field` of an untyped JSON answer.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Contract`] if `field` is absent, is not an array, or holds anything
    /// other than integers.
    pub fn from_json(value: &Value, field: &str) -> Result<Self, OracleError> {
        let entries = value
            .get(field)
            .ok_or_else(|| OracleError::Contract(format!("missing field '{}'", field)))?
            .as_array()
            .ok_or_else(|| OracleError::Contract(format!("field '{}' is not an array", field)))?;
        let selected_indices = entries
            .iter()
            .map(|entry| {
                entry.as_i64().ok_or_else(|| {
                    OracleError::Contract(format!(
                        "field '{}' contains non-integer entry {}",
                        field, entry
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selected_indices })
    }

    /// Converts the answer into 0-based positions of a list holding `len` candidates.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Contract`] for the first index outside `[1, len]`.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>, OracleError> {
        self.selected_indices
            .iter()
            .map(|&index| match usize::try_from(index) {
                Ok(one_based) if (1..=len).contains(&one_based) => Ok(one_based - 1),
                _ => Err(OracleError::Contract(format!(
                    "index {} outside [1, {}]",
                    index, len
                ))),
            })
            .collect()
    }
}

/// Decides which of the candidates found near a mention are relevant to it.
///
/// Implementations are only consulted with non-empty candidate lists.
pub trait DisambiguationOracle: Send + Sync {
    fn select_relevant(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError>;
}

/// Answers every request of a role with the same pre-set indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedSelectionOracle {
    software: Vec<i64>,
    water: Vec<i64>,
}

impl FixedSelectionOracle {
    pub fn new(software: Vec<i64>, water: Vec<i64>) -> Self {
        Self { software, water }
    }
}

impl DisambiguationOracle for FixedSelectionOracle {
    fn select_relevant(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        let indices = match request.role {
            OracleRole::Software => &self.software,
            OracleRole::Water => &self.water,
        };
        Ok(OracleResponse::new(indices.iter().copied()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// The closest candidate only.
    #[default]
    Nearest,
    /// Every candidate.
    All,
}

/// Deterministic oracle applying a fixed [`SelectionPolicy`], for offline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyOracle {
    policy: SelectionPolicy,
}

impl PolicyOracle {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }
}

impl DisambiguationOracle for PolicyOracle {
    fn select_relevant(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        let len = request.len() as i64;
        let indices = match self.policy {
            SelectionPolicy::Nearest => (1..=len.min(1)).collect::<Vec<_>>(),
            SelectionPolicy::All => (1..=len).collect(),
        };
        Ok(OracleResponse::new(indices))
    }
}
