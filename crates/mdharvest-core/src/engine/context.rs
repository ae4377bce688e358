use super::config::{ExtractionConfig, ResolutionScope};
use super::progress::{Progress, ProgressReporter};
use super::tasks::{candidate_filter, proximity_scan};
use crate::core::models::candidate::Candidate;
use crate::core::models::mention::ProteinMention;
use crate::core::models::sentence::Document;
use tracing::debug;

/// The filtered, distance-ordered candidate lists offered to the oracle for a mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCandidates {
    pub software: Vec<Candidate>,
    pub water: Vec<Candidate>,
}

/// State shared by every mention of one document.
///
/// Under [`ResolutionScope::PerDocument`] the candidate lists are computed around the first
/// mention resolved and then frozen: later mentions reuse them unchanged.
pub struct DocumentContext<'a> {
    pub document: &'a Document,
    pub config: &'a ExtractionConfig,
    pub reporter: &'a ProgressReporter<'a>,
    resolved: bool,
    anchor: Option<String>, // Id of the mention the frozen lists were scanned around
    reuse_announced: bool,
    candidates: ResolvedCandidates,
}

impl<'a> DocumentContext<'a> {
    pub fn new(
        document: &'a Document,
        config: &'a ExtractionConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            document,
            config,
            reporter,
            resolved: false,
            anchor: None,
            reuse_announced: false,
            candidates: ResolvedCandidates::default(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Makes the candidate lists applicable to `mention` current.
    pub fn resolve(&mut self, mention: &ProteinMention) {
        let rescan = match self.config.resolution_scope {
            ResolutionScope::PerDocument => !self.resolved,
            ResolutionScope::PerMention => true,
        };
        if !rescan {
            debug!(id = %mention.id, "Reusing candidate lists resolved for this document.");
            if !self.reuse_announced {
                self.reuse_announced = true;
                self.reporter.report(Progress::Message(format!(
                    "Reusing candidate lists resolved around {} for the remaining mentions",
                    self.anchor.as_deref().unwrap_or("the first mention")
                )));
            }
            return;
        }

        let scan = proximity_scan::run(
            self.document,
            mention.sentence_index,
            self.config.context_radius,
        );
        self.candidates = ResolvedCandidates {
            software: candidate_filter::run(scan.software),
            water: candidate_filter::run(scan.water),
        };
        self.resolved = true;
        self.anchor = Some(mention.id.clone());
    }

    pub fn candidates(&self) -> &ResolvedCandidates {
        &self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ExtractionConfigBuilder;
    use std::sync::{Arc, Mutex};

    fn document() -> Document {
        Document::from_text(
            "PDB entry 1AAA was used. Runs used NAMD. Later runs used GROMACS. PDB entry 2BBB was compared.",
        )
    }

    fn first_software(context: &DocumentContext<'_>) -> String {
        context.candidates().software[0]
            .as_software()
            .unwrap()
            .name
            .clone()
    }

    #[test]
    fn per_document_scope_freezes_lists_after_first_mention() {
        let doc = document();
        let config = ExtractionConfig::default();
        let reporter = ProgressReporter::new();
        let mut context = DocumentContext::new(&doc, &config, &reporter);
        assert!(!context.is_resolved());

        context.resolve(&ProteinMention::experimental("1AAA", 0));
        assert!(context.is_resolved());
        assert_eq!(first_software(&context), "NAMD");

        context.resolve(&ProteinMention::experimental("2BBB", 3));
        assert_eq!(first_software(&context), "NAMD");
    }

    #[test]
    fn reuse_is_announced_once_per_document() {
        let doc = document();
        let config = ExtractionConfig::default();
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = messages.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::Message(text) = event {
                sink.lock().unwrap().push(text);
            }
        }));
        let mut context = DocumentContext::new(&doc, &config, &reporter);

        context.resolve(&ProteinMention::experimental("1AAA", 0));
        assert!(messages.lock().unwrap().is_empty());

        context.resolve(&ProteinMention::experimental("2BBB", 3));
        context.resolve(&ProteinMention::experimental("1AAA", 0));
        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("1AAA"));
    }

    #[test]
    fn per_mention_scope_rescans_every_time() {
        let doc = document();
        let config = ExtractionConfigBuilder::new()
            .resolution_scope(ResolutionScope::PerMention)
            .build();
        let reporter = ProgressReporter::new();
        let mut context = DocumentContext::new(&doc, &config, &reporter);

        context.resolve(&ProteinMention::experimental("1AAA", 0));
        assert_eq!(first_software(&context), "NAMD");

        context.resolve(&ProteinMention::experimental("2BBB", 3));
        assert_eq!(first_software(&context), "GROMACS");
    }
}
