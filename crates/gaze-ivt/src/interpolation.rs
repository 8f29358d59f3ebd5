//! Linear interpolation of short tracking gaps.
//!
//! Trackers drop isolated frames (glare, partial occlusion) far more often
//! than they lose the eye for a blink. A run of missing samples no longer
//! than `max_gap` and bounded by samples on both sides is filled on the
//! straight line between its neighbours:
//!
//! p_k = p_before + k / (L + 1) · (p_after - p_before),  k = 1..=L
//!
//! Filled samples are marked [`Validity::Interpolated`] so later stages and
//! the exported table can tell them from observed data. Runs touching either
//! end of the recording have only one neighbour and stay invalid.

use gaze_core::{Eye, Sample, Validity};
use tracing::debug;

use crate::runs::runs_where;

#[derive(Debug, Clone)]
pub struct GapInterpolator {
    /// Longest gap that is filled (samples)
    pub max_gap: usize,
}

impl GapInterpolator {
    pub fn new(max_gap: usize) -> Self {
        Self { max_gap }
    }

    /// Fill short gaps of `eye` in place; returns the number of filled samples
    pub fn interpolate(&self, samples: &mut [Sample], eye: Eye) -> usize {
        let gaps = runs_where(samples, |s| s.channel(eye).validity.is_invalid());
        let mut filled = 0;

        for gap in gaps {
            let len = gap.len();
            if len > self.max_gap {
                continue;
            }
            if gap.start == 0 || gap.end == samples.len() {
                debug!(start = gap.start, len, "gap touches recording boundary, left invalid");
                continue;
            }

            let before = samples[gap.start - 1].channel(eye).point;
            let after = samples[gap.end].channel(eye).point;
            let (Some(before), Some(after)) = (before, after) else {
                debug!(start = gap.start, len, "gap neighbour has no coordinate, left invalid");
                continue;
            };

            for (k, idx) in gap.enumerate() {
                let alpha = (k + 1) as f64 / (len + 1) as f64;
                let channel = samples[idx].channel_mut(eye);
                channel.point = Some(before.lerp(&after, alpha));
                channel.validity = Validity::Interpolated;
            }
            filled += len;
        }

        debug!(filled, "gap interpolation done");
        filled
    }
}
