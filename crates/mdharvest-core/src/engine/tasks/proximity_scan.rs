use crate::core::matchers::software::find_software;
use crate::core::matchers::water::find_water_model;
use crate::core::models::candidate::{Candidate, Direction};
use crate::core::models::sentence::Document;
use tracing::{debug, instrument};

/// Candidates found around one sentence, each list ordered by ascending distance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub software: Vec<Candidate>,
    pub water: Vec<Candidate>,
}

/// Scans outward from sentence `origin` for software and water-model candidates.
///
/// Distances run from 1 up to the farther document edge; at each distance the following
/// sentence is inspected before the preceding one. Both lists are sorted by distance, ties
/// keeping discovery order.
#[instrument(skip_all, name = "proximity_scan_task", fields(origin = origin))]
pub fn run(document: &Document, origin: usize, context_radius: usize) -> ScanResult {
    let mut result = ScanResult::default();
    let max_distance = document.len().saturating_sub(origin + 1).max(origin);

    for distance in 1..=max_distance {
        let after = origin + distance;
        if after < document.len() {
            inspect(document, after, distance, Direction::After, context_radius, &mut result);
        }
        if let Some(before) = origin.checked_sub(distance) {
            inspect(document, before, distance, Direction::Before, context_radius, &mut result);
        }
    }

    result.software.sort_by_key(|candidate| candidate.distance);
    result.water.sort_by_key(|candidate| candidate.distance);

    debug!(
        software = result.software.len(),
        water = result.water.len(),
        "Proximity scan complete."
    );
    result
}

fn inspect(
    document: &Document,
    target: usize,
    distance: usize,
    direction: Direction,
    context_radius: usize,
    result: &mut ScanResult,
) {
    let Some(sentence) = document.get(target) else {
        return;
    };

    if let Some(software) = find_software(&sentence.text) {
        let context = document.context_window(target, context_radius);
        result
            .software
            .push(Candidate::software(software, distance, direction, context));
    }
    if let Some(water) = find_water_model(&sentence.text) {
        let context = document.context_window(target, context_radius);
        result
            .water
            .push(Candidate::water(water, distance, direction, context));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document::from_text(
            "GROMACS was used first. \
             The solvent was TIP3P water. \
             The PDB entry 1ABC was studied. \
             Later NAMD runs followed. \
             Nothing else happened. \
             Finally LAMMPS was tried.",
        )
    }

    #[test]
    fn scans_both_directions_up_to_the_far_edge() {
        let doc = document();
        assert_eq!(doc.len(), 6);
        let result = run(&doc, 2, 2);

        let software: Vec<_> = result
            .software
            .iter()
            .map(|c| (c.as_software().unwrap().name.as_str(), c.distance, c.direction))
            .collect();
        assert_eq!(
            software,
            vec![
                ("NAMD", 1, Direction::After),
                ("GROMACS", 2, Direction::Before),
                ("LAMMPS", 3, Direction::After),
            ]
        );

        assert_eq!(result.water.len(), 1);
        assert_eq!(result.water[0].distance, 1);
        assert_eq!(result.water[0].direction, Direction::Before);
    }

    #[test]
    fn at_equal_distance_after_is_discovered_before_before() {
        let doc = Document::from_text("NAMD came first. PDB entry 1ABC. GROMACS came last.");
        let result = run(&doc, 1, 2);
        let names: Vec<_> = result
            .software
            .iter()
            .map(|c| c.as_software().unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["GROMACS", "NAMD"]);
    }

    #[test]
    fn origin_sentence_itself_is_never_inspected() {
        let doc = Document::from_text("PDB entry 1ABC was simulated with GROMACS in water.");
        let result = run(&doc, 0, 2);
        assert!(result.software.is_empty());
        assert!(result.water.is_empty());
    }

    #[test]
    fn candidates_carry_the_context_window_of_their_sentence() {
        let doc = document();
        let result = run(&doc, 2, 1);
        let namd = &result.software[0];
        assert_eq!(
            namd.context,
            "The PDB entry 1ABC was studied. Later NAMD runs followed. Nothing else happened."
        );
    }
}
