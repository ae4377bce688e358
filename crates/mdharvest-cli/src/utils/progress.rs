use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use mdharvest::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

const SPINNER_TICK_MS: u64 = 80;

/// Renders pipeline progress as a spinner per phase and a bar over mentions, on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(name);
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_with_message("✓ Done");
                }
                Progress::TaskStart { total_steps } => {
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total_steps);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                }
                Progress::TaskIncrement => pb.inc(1),
                Progress::TaskFinish => {
                    let total = pb.length().unwrap_or(0);
                    if pb.position() < total {
                        pb.set_position(total);
                    }
                    pb.finish();
                }
                Progress::MentionReviewed(review) => {
                    debug!(
                        id = %review.mention.id,
                        software = review.software.len(),
                        water = review.water.len(),
                        "Mention reviewed."
                    );
                    pb.set_message(review.mention.id.clone());
                }
                Progress::Message(msg) => {
                    if pb.is_finished() {
                        pb.set_message(msg);
                    } else {
                        pb.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdharvest::core::models::mention::ProteinMention;
    use mdharvest::engine::progress::MentionReview;
    use std::thread;

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_the_mention_resolution_phase() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Mention Resolution",
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Mention Resolution");
            assert!(!pb.is_finished());
        }

        callback(Progress::TaskStart { total_steps: 3 });
        callback(Progress::MentionReviewed(Box::new(MentionReview {
            mention: ProteinMention::experimental("1QLX", 0),
            sentence: "PDB ID 1QLX was simulated.".to_string(),
            software: Vec::new(),
            water: Vec::new(),
        })));
        callback(Progress::TaskIncrement);
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 1);
            assert_eq!(pb.message(), "1QLX");
        }

        callback(Progress::TaskFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 3);
        }

        callback(Progress::PhaseFinish);
        assert_eq!(handler.pb.lock().unwrap().message(), "✓ Done");
    }

    #[test]
    fn callback_can_be_driven_from_another_thread() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Segmentation",
            });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }
}
