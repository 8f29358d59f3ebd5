//! Blink and tracking-error detection over the remaining invalid runs.

use gaze_core::{Eye, EyeState, Sample};
use tracing::debug;

use crate::runs::runs_where;

#[derive(Debug, Clone)]
pub struct BlinkDetector {
    /// Minimum run of missing samples counted as a blink
    pub blink_threshold: usize,
}

impl BlinkDetector {
    pub fn new(blink_threshold: usize) -> Self {
        Self { blink_threshold }
    }

    /// Provisional labels: `Blink`/`Error` for invalid runs, `None` elsewhere.
    ///
    /// Must run after gap interpolation; interpolated samples are not invalid.
    pub fn detect(&self, samples: &[Sample], eye: Eye) -> Vec<Option<EyeState>> {
        let mut labels = vec![None; samples.len()];
        let mut blinks = 0;

        for run in runs_where(samples, |s| s.channel(eye).validity.is_invalid()) {
            let state = if run.len() >= self.blink_threshold {
                blinks += 1;
                EyeState::Blink
            } else {
                EyeState::Error
            };
            labels[run].fill(Some(state));
        }

        debug!(blinks, "blink detection done");
        labels
    }
}
