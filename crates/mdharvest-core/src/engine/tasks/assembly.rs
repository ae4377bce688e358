use crate::core::models::candidate::Candidate;
use crate::core::models::mention::ProteinMention;
use crate::core::models::record::ProteinRecord;
use crate::engine::error::EngineError;
use tracing::{instrument, trace};

/// Builds the records of one mention from the selected candidates and appends the new ones.
///
/// Without software candidates the bare mention record stands in for the software choice.
/// Each software choice is crossed with the water choices, or emitted as is when there are no
/// water candidates. Records identical to one already in `records` are dropped. Returns the
/// number of records appended.
#[instrument(skip_all, name = "assembly_task", fields(id = %mention.id))]
pub fn run(
    mention: &ProteinMention,
    software: &[Candidate],
    software_selection: &[usize],
    water: &[Candidate],
    water_selection: &[usize],
    records: &mut Vec<ProteinRecord>,
) -> Result<usize, EngineError> {
    let base = ProteinRecord::from_mention(mention);

    let partials = if software.is_empty() {
        vec![base]
    } else {
        software_selection
            .iter()
            .map(|&position| {
                let choice = software
                    .get(position)
                    .and_then(Candidate::as_software)
                    .ok_or_else(|| {
                        EngineError::Internal(format!(
                            "software selection {} does not name a software candidate",
                            position
                        ))
                    })?;
                Ok(base.clone().with_software(choice))
            })
            .collect::<Result<Vec<_>, EngineError>>()?
    };

    let mut appended = 0;
    for partial in partials {
        if water.is_empty() {
            appended += push_unique(records, partial);
            continue;
        }
        for &position in water_selection {
            let choice = water
                .get(position)
                .and_then(Candidate::as_water)
                .ok_or_else(|| {
                    EngineError::Internal(format!(
                        "water selection {} does not name a water candidate",
                        position
                    ))
                })?;
            appended += push_unique(records, partial.clone().with_water(choice));
        }
    }
    Ok(appended)
}

fn push_unique(records: &mut Vec<ProteinRecord>, record: ProteinRecord) -> usize {
    if records.contains(&record) {
        trace!(id = %record.id, "Duplicate record dropped.");
        0
    } else {
        records.push(record);
        1
    }
}
