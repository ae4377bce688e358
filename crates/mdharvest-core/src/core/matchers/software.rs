use super::literal_word;
use crate::core::models::candidate::SoftwareMatch;
use crate::core::text::vocabulary::SOFTWARE_PACKAGES;
use once_cell::sync::Lazy;
use regex::Regex;

static PACKAGE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SOFTWARE_PACKAGES
        .iter()
        .map(|name| (*name, literal_word(name)))
        .collect()
});

// A version number written directly after the package name, e.g. "GROMACS 2018" or "(NAMD) 2.14".
static TRAILING_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*\)?\s*([0-9]+(?:\.[0-9a-z]+)*)\b")
        .expect("trailing version pattern is valid")
});

// A version number introduced by a prefix, e.g. "version 4.6", "v. 2.12", "ver: 3".
static PREFIXED_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:version|vers\.?|ver|v)\s*[:=]?\s*([0-9]+(?:\.[0-9a-z]+)*)\b")
        .expect("prefixed version pattern is valid")
});

/// Finds the first known simulation package named in `sentence`.
///
/// Packages are tried in vocabulary order and the first one present anywhere in the sentence
/// wins. The reported name is the vocabulary spelling. The version, if any, is looked for only
/// in the text following the matched name.
pub fn find_software(sentence: &str) -> Option<SoftwareMatch> {
    PACKAGE_PATTERNS.iter().find_map(|(name, pattern)| {
        pattern.find(sentence).map(|m| SoftwareMatch {
            name: (*name).to_string(),
            version: find_version(&sentence[m.end()..]),
        })
    })
}

/// Extracts a version token from the text that follows a package name.
///
/// A bare number immediately after the name takes precedence, otherwise the first prefixed
/// version anywhere in `remainder` is used.
pub fn find_version(remainder: &str) -> Option<String> {
    TRAILING_VERSION
        .captures(remainder)
        .or_else(|| PREFIXED_VERSION.captures(remainder))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
