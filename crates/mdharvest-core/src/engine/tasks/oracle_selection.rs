use crate::core::models::candidate::Candidate;
use crate::core::models::mention::ProteinMention;
use crate::engine::error::EngineError;
use crate::engine::oracle::{DisambiguationOracle, OracleRequest, OracleRole};
use tracing::{debug, instrument};

/// Asks `oracle` which of `candidates` belong to `mention`, returning 0-based positions.
///
/// An empty candidate list selects nothing and the oracle is not consulted. The answer is
/// validated against the length of the list that was sent.
#[instrument(skip_all, name = "oracle_selection_task", fields(role = %role, id = %mention.id))]
pub fn run(
    oracle: &dyn DisambiguationOracle,
    role: OracleRole,
    mention: &ProteinMention,
    sentence: &str,
    candidates: &[Candidate],
) -> Result<Vec<usize>, EngineError> {
    if candidates.is_empty() {
        debug!("No candidates; oracle not consulted.");
        return Ok(Vec::new());
    }

    let request = OracleRequest::new(role, mention, sentence, candidates);
    let response = oracle
        .select_relevant(&request)
        .map_err(|e| EngineError::from_oracle(role, e))?;
    let positions = response
        .positions(candidates.len())
        .map_err(|e| EngineError::from_oracle(role, e))?;

    debug!(selected = ?response.selected_indices, "Oracle selection accepted.");
    Ok(positions)
}
