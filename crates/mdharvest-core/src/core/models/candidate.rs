use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Before,
    After,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Before => f.write_str("before"),
            Direction::After => f.write_str("after"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterModelCategory {
    Explicit, // Atomistic solvent (TIP3P, SPC/E, ...)
    Implicit, // Continuum solvent (GB, PB/SASA, ...)
}

impl WaterModelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterModelCategory::Explicit => "explicit",
            WaterModelCategory::Implicit => "implicit",
        }
    }
}

impl fmt::Display for WaterModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulation package recognized in a sentence, with its canonical vocabulary spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoftwareMatch {
    pub name: String,
    pub version: Option<String>,
}

/// A water model recognized in a sentence.
///
/// `model` is `None` when only the category could be established (e.g., "explicit solvent").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaterModelMatch {
    pub category: WaterModelCategory,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CandidatePayload {
    Software(SoftwareMatch),
    Water(WaterModelMatch),
}

/// A tentative software or water-model detection near a protein mention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub payload: CandidatePayload,
    pub distance: usize, // Sentences away from the mention, always >= 1
    pub direction: Direction,
    pub context: String, // Target sentence with up to two neighbours on each side
}

impl Candidate {
    pub fn software(
        software: SoftwareMatch,
        distance: usize,
        direction: Direction,
        context: String,
    ) -> Self {
        Self {
            payload: CandidatePayload::Software(software),
            distance,
            direction,
            context,
        }
    }

    pub fn water(
        water: WaterModelMatch,
        distance: usize,
        direction: Direction,
        context: String,
    ) -> Self {
        Self {
            payload: CandidatePayload::Water(water),
            distance,
            direction,
            context,
        }
    }

    /// Case-insensitive grouping key: the package name for software, the category for water.
    pub fn group_key(&self) -> String {
        match &self.payload {
            CandidatePayload::Software(software) => software.name.to_lowercase(),
            CandidatePayload::Water(water) => water.category.as_str().to_string(),
        }
    }

    /// Whether the candidate carries its distinguishing attribute: a version for software,
    /// a specific model name for water.
    pub fn is_specific(&self) -> bool {
        match &self.payload {
            CandidatePayload::Software(software) => software.version.is_some(),
            CandidatePayload::Water(water) => water.model.is_some(),
        }
    }

    pub fn as_software(&self) -> Option<&SoftwareMatch> {
        match &self.payload {
            CandidatePayload::Software(software) => Some(software),
            CandidatePayload::Water(_) => None,
        }
    }

    pub fn as_water(&self) -> Option<&WaterModelMatch> {
        match &self.payload {
            CandidatePayload::Water(water) => Some(water),
            CandidatePayload::Software(_) => None,
        }
    }

    /// One-line human-readable description used in oracle prompts and diagnostics.
    pub fn label(&self) -> String {
        match &self.payload {
            CandidatePayload::Software(software) => format!(
                "{} (version: {})",
                software.name,
                software.version.as_deref().unwrap_or("None")
            ),
            CandidatePayload::Water(water) => match &water.model {
                Some(model) => format!("{} {}", model, water.category),
                None => format!("{} water model", water.category),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gromacs(version: Option<&str>) -> Candidate {
        Candidate::software(
            SoftwareMatch {
                name: "GROMACS".to_string(),
                version: version.map(str::to_string),
            },
            1,
            Direction::After,
            String::new(),
        )
    }

    #[test]
    fn group_key_is_case_insensitive_software_name() {
        assert_eq!(gromacs(None).group_key(), "gromacs");
    }

    #[test]
    fn group_key_for_water_is_the_category() {
        let candidate = Candidate::water(
            WaterModelMatch {
                category: WaterModelCategory::Implicit,
                model: Some("GB".to_string()),
            },
            2,
            Direction::Before,
            String::new(),
        );
        assert_eq!(candidate.group_key(), "implicit");
        assert!(candidate.is_specific());
    }

    #[test]
    fn label_renders_missing_version_and_generic_water() {
        assert_eq!(gromacs(None).label(), "GROMACS (version: None)");
        assert_eq!(gromacs(Some("2018")).label(), "GROMACS (version: 2018)");

        let generic = Candidate::water(
            WaterModelMatch {
                category: WaterModelCategory::Explicit,
                model: None,
            },
            1,
            Direction::After,
            String::new(),
        );
        assert_eq!(generic.label(), "explicit water model");
    }
}
