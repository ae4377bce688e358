use crate::core::matchers::protein::extract_mentions;
use crate::core::models::mention::ProteinMention;
use crate::core::models::record::{ProteinRecord, PublicRecord};
use crate::core::models::sentence::Document;
use crate::engine::config::ExtractionConfig;
use crate::engine::context::DocumentContext;
use crate::engine::error::EngineError;
use crate::engine::oracle::{DisambiguationOracle, OracleRole, PolicyOracle, SelectionPolicy};
use crate::engine::progress::{MentionReview, Progress, ProgressReporter};
use crate::engine::tasks::{assembly, oracle_selection};
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub mentions: Vec<ProteinMention>,
    pub records: Vec<ProteinRecord>,
}

impl ExtractionResult {
    /// The records in the shape handed to callers, see [`ProteinRecord::project`].
    pub fn public_records(&self, include_water_model_type: bool) -> Vec<PublicRecord<'_>> {
        self.records
            .iter()
            .map(|record| record.project(include_water_model_type))
            .collect()
    }
}

/// Extracts simulation metadata records from `text`.
///
/// Empty or whitespace-only text yields an empty result. Any oracle failure or malformed
/// oracle answer aborts the whole document.
#[instrument(skip_all, name = "extraction_workflow")]
pub fn run(
    text: &str,
    config: &ExtractionConfig,
    oracle: &dyn DisambiguationOracle,
    reporter: &ProgressReporter,
) -> Result<ExtractionResult, EngineError> {
    // === Phase 1: Sentence segmentation ===
    reporter.report(Progress::PhaseStart {
        name: "Segmentation",
    });
    let document = Document::from_text(text);
    reporter.report(Progress::PhaseFinish);
    info!(sentences = document.len(), "Text segmented.");

    if document.is_empty() {
        return Ok(ExtractionResult::default());
    }

    // === Phase 2: Protein mentions ===
    reporter.report(Progress::PhaseStart {
        name: "Identifier Extraction",
    });
    let mentions = extract_mentions(&document);
    reporter.report(Progress::PhaseFinish);
    info!(mentions = mentions.len(), "Protein mentions extracted.");

    // === Phase 3: Per-mention resolution ===
    reporter.report(Progress::PhaseStart {
        name: "Mention Resolution",
    });
    reporter.report(Progress::TaskStart {
        total_steps: mentions.len() as u64,
    });

    let mut context = DocumentContext::new(&document, config, reporter);
    let mut records = Vec::new();
    for mention in &mentions {
        resolve_mention(&mut context, oracle, mention, &mut records)?;
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(records = records.len(), "Extraction complete.");

    Ok(ExtractionResult { mentions, records })
}

/// Runs the pipeline with the default configuration and the nearest-candidate oracle.
pub fn process(text: &str) -> Result<Vec<ProteinRecord>, EngineError> {
    let oracle = PolicyOracle::new(SelectionPolicy::Nearest);
    run(
        text,
        &ExtractionConfig::default(),
        &oracle,
        &ProgressReporter::new(),
    )
    .map(|result| result.records)
}

fn resolve_mention(
    context: &mut DocumentContext<'_>,
    oracle: &dyn DisambiguationOracle,
    mention: &ProteinMention,
    records: &mut Vec<ProteinRecord>,
) -> Result<(), EngineError> {
    let document = context.document;
    let sentence = document
        .get(mention.sentence_index)
        .map(|sentence| sentence.text.as_str())
        .ok_or_else(|| {
            EngineError::Internal(format!(
                "mention {} points at missing sentence {}",
                mention.id, mention.sentence_index
            ))
        })?;

    context.resolve(mention);
    let candidates = context.candidates();

    if context.reporter.is_observed() {
        context
            .reporter
            .report(Progress::MentionReviewed(Box::new(MentionReview {
                mention: mention.clone(),
                sentence: sentence.to_string(),
                software: candidates.software.clone(),
                water: candidates.water.clone(),
            })));
    }

    let software_selection = oracle_selection::run(
        oracle,
        OracleRole::Software,
        mention,
        sentence,
        &candidates.software,
    )?;
    let water_selection = oracle_selection::run(
        oracle,
        OracleRole::Water,
        mention,
        sentence,
        &candidates.water,
    )?;

    assembly::run(
        mention,
        &candidates.software,
        &software_selection,
        &candidates.water,
        &water_selection,
        records,
    )?;
    Ok(())
}
