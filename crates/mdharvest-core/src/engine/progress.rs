use crate::core::models::candidate::Candidate;
use crate::core::models::mention::ProteinMention;

/// Everything the oracle is shown for one mention, published before it is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionReview {
    pub mention: ProteinMention,
    pub sentence: String,
    pub software: Vec<Candidate>,
    pub water: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    MentionReviewed(Box<MentionReview>),

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Whether anyone is listening; lets callers skip building expensive events.
    #[inline]
    pub fn is_observed(&self) -> bool {
        self.callback.is_some()
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
