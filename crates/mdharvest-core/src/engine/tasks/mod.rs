//! Tasks performing the individual steps of mention resolution.
//!
//! Each submodule exposes a `run` function covering one step: scanning the neighbourhood of a
//! mention for candidates, collapsing duplicate candidates, consulting the oracle for one
//! candidate list, and assembling the selected candidates into records.

pub mod assembly;
pub mod candidate_filter;
pub mod oracle_selection;
pub mod proximity_scan;
