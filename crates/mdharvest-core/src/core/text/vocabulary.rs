use crate::core::models::candidate::WaterModelCategory;
use phf::{Set, phf_set};

/// Structure-prediction tools whose output is reported as a simulated structure.
pub const SIMULATION_TOOLS: &[&str] = &["AlphaFold", "RosettaFold"];

/// Known simulation packages, in match priority order.
///
/// The first entry found in a sentence wins, regardless of where in the sentence it occurs,
/// so longer names that share a prefix with a shorter one must come first if both are wanted.
pub const SOFTWARE_PACKAGES: &[&str] = &[
    "Abalone",
    "ADF",
    "Ascalaph Designer",
    "Avogadro",
    "BOSS",
    "CHARRM",
    "Folding@home",
    "CP2K",
    "Desmond",
    "Discovery Studio",
    "Espresso",
    "fold.it",
    "FoldX",
    "GROMACS",
    "HOOMD-blue",
    "Schroedinger",
    "Schroedinger Suite",
    "LAMMPS",
    "MAPS",
    "MDynaMix",
    "MOE",
    "ms2",
    "OpenMM",
    "Orac",
    "NAMD",
    "NWChem",
    "PLUMED",
    "SAMSON",
    "Scigress",
    "Spartan",
    "TeraChem",
    "TINKER",
    "VASP",
    "YASARA",
];

/// Words whose presence marks a sentence as talking about solvation at all.
pub const WATER_CONTEXT_KEYWORDS: &[&str] = &["water", "solvent", "water model"];

pub const EXPLICIT_WATER_MODELS: &[&str] = &[
    "TIPS",
    "SPC",
    "TIP3P",
    "SPC/E",
    "BF",
    "TIPS2",
    "TIP4P",
    "TIP4P-Ew",
    "TIP4P/Ice",
    "TIP4P/2005",
    "OPC",
    "TIP4P-D",
    "Explicit water",
    "Explicit solvent",
    "esp water",
];

pub const IMPLICIT_WATER_MODELS: &[&str] = &[
    "Quantum Models",
    "Coarse Grained Solvent",
    "Nonlinear PB",
    "Linear PB",
    "PB/SASA",
    "GB/SASA/VOL",
    "SASA",
    "GB",
    "VOL",
    "Distance-dependent dielectric",
    "Implicit water",
    "Implicit solvent",
    "imp water",
    "Martini",
];

/// Generic explicit-solvent phrases, tried only when no vocabulary model matched.
pub const EXPLICIT_WATER_KEYWORDS: &[&str] = &[
    "explicit solvent",
    "explicit water",
    "explicit solvent model",
    "explicit water model",
    "explicit solvent content",
    "Polarizable Explicit Solvent",
    "Fixed charge explicit content",
];

/// Generic implicit-solvent phrases, tried after the explicit ones.
pub const IMPLICIT_WATER_KEYWORDS: &[&str] = &[
    "implicit water",
    "implicit solvent model",
    "implicit solvent content",
    "implicit solvent",
];

// Lowercased copies of the keyword lists, for membership tests.
static GENERIC_EXPLICIT_TERMS: Set<&'static str> = phf_set! {
    "explicit solvent",
    "explicit water",
    "explicit solvent model",
    "explicit water model",
    "explicit solvent content",
    "polarizable explicit solvent",
    "fixed charge explicit content",
};

static GENERIC_IMPLICIT_TERMS: Set<&'static str> = phf_set! {
    "implicit water",
    "implicit solvent model",
    "implicit solvent content",
    "implicit solvent",
};

/// Phrases at least one of which must occur in a sentence hosting an experimental identifier.
pub const IDENTIFIER_CONTEXT_KEYWORDS: &[&str] = &[
    "protein data bank",
    "pdb",
    "protein entry",
    "protein id",
    "accession code",
    "structure",
];

/// Whether `term` names a category rather than a specific water model.
pub fn is_generic_water_term(category: WaterModelCategory, term: &str) -> bool {
    let term = term.to_lowercase();
    match category {
        WaterModelCategory::Explicit => GENERIC_EXPLICIT_TERMS.contains(term.as_str()),
        WaterModelCategory::Implicit => GENERIC_IMPLICIT_TERMS.contains(term.as_str()),
    }
}

/// Whether `sentence` contains one of [`IDENTIFIER_CONTEXT_KEYWORDS`] (case-insensitive substring).
pub fn has_identifier_context(sentence: &str) -> bool {
    let lowered = sentence.to_lowercase();
    IDENTIFIER_CONTEXT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
