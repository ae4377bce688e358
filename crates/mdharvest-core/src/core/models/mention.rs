use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    Simulated,    // Named structure-prediction tool (e.g., AlphaFold)
    Experimental, // Validated 4-character deposition code (e.g., 1QLX)
}

impl MentionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentionKind::Simulated => "simulated",
            MentionKind::Experimental => "experimental",
        }
    }
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protein identifier detected in the document, anchoring one or more output records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProteinMention {
    pub id: String,
    pub kind: MentionKind,
    pub sentence_index: usize,
}

impl ProteinMention {
    pub fn simulated(id: impl Into<String>, sentence_index: usize) -> Self {
        Self {
            id: id.into(),
            kind: MentionKind::Simulated,
            sentence_index,
        }
    }

    pub fn experimental(id: impl Into<String>, sentence_index: usize) -> Self {
        Self {
            id: id.into(),
            kind: MentionKind::Experimental,
            sentence_index,
        }
    }
}
