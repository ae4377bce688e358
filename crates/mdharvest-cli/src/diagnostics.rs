use crate::error::Result;
use mdharvest::core::models::candidate::Candidate;
use mdharvest::engine::progress::{MentionReview, Progress, ProgressCallback};
use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Appends, for every reviewed mention, the candidate lists that were put before the oracle.
#[derive(Clone)]
pub struct DiagnosticsWriter {
    file: Arc<Mutex<BufWriter<File>>>,
}

impl DiagnosticsWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    pub fn record(&self, review: &MentionReview) -> std::io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("diagnostics writer mutex was poisoned"))?;
        file.write_all(render(review).as_bytes())
    }

    pub fn flush(&self) -> std::io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("diagnostics writer mutex was poisoned"))?;
        file.flush()
    }

    /// Wraps `inner` so that mention reviews are also written here before being forwarded.
    pub fn observe(&self, inner: ProgressCallback<'static>) -> ProgressCallback<'static> {
        let writer = self.clone();
        Box::new(move |progress: Progress| {
            if let Progress::MentionReviewed(review) = &progress {
                if let Err(e) = writer.record(review) {
                    warn!(id = %review.mention.id, "Failed to write diagnostics: {}", e);
                }
            }
            inner(progress);
        })
    }
}

fn render(review: &MentionReview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PDB ID: {}", review.mention.id);
    let _ = writeln!(out, "Protein sentence: {}", review.sentence);
    let _ = writeln!(
        out,
        "Protein sentence position: {}",
        review.mention.sentence_index
    );
    render_list(&mut out, "Software matches", &review.software);
    render_list(&mut out, "Water model matches", &review.water);
    out.push('\n');
    out
}

fn render_list(out: &mut String, heading: &str, candidates: &[Candidate]) {
    let _ = writeln!(out, "{} ({}):", heading, candidates.len());
    for candidate in candidates {
        let _ = writeln!(
            out,
            "- {}, distance: {} {}",
            candidate.label(),
            candidate.distance,
            candidate.direction
        );
        let _ = writeln!(out, "  Context: {}", candidate.context);
    }
}
