use crate::core::models::candidate::Candidate;
use std::collections::HashMap;
use tracing::{instrument, trace};

/// Keeps one representative per case-insensitive group key.
///
/// A candidate replaces the current representative of its group if it carries the
/// distinguishing attribute (version, specific model) and the representative does not, or if
/// both agree on the attribute and it is strictly closer. Groups keep the position of their first
/// member, and the result is ordered by ascending distance (stable).
#[instrument(skip_all, name = "candidate_filter_task")]
pub fn run(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let key = candidate.group_key();
        match slots.get(&key) {
            Some(&slot) => {
                if supersedes(&candidate, &kept[slot]) {
                    trace!(key = %key, distance = candidate.distance, "Candidate replaced.");
                    kept[slot] = candidate;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept.sort_by_key(|candidate| candidate.distance);
    kept
}

/// Whether `challenger` should replace `incumbent` as its group's representative.
pub fn supersedes(challenger: &Candidate, incumbent: &Candidate) -> bool {
    match (challenger.is_specific(), incumbent.is_specific()) {
        (true, false) => true,
        (false, true) => false,
        _ => challenger.distance < incumbent.distance,
    }
}
