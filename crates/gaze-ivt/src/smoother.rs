//! Removal of single-frame errors inside saccades.

use gaze_core::EyeState;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct StateSmoother;

impl StateSmoother {
    pub fn new() -> Self {
        Self
    }

    /// Relabel every `Error` sandwiched between two `Saccade`s as `Saccade`.
    ///
    /// Scans left to right once; returns the number of relabeled samples.
    pub fn smooth(&self, states: &mut [EyeState]) -> usize {
        let mut smoothed = 0;

        for i in 1..states.len().saturating_sub(1) {
            if states[i - 1] == EyeState::Saccade
                && states[i] == EyeState::Error
                && states[i + 1] == EyeState::Saccade
            {
                states[i] = EyeState::Saccade;
                smoothed += 1;
            }
        }

        if smoothed > 0 {
            debug!(smoothed, "isolated errors merged into saccades");
        }
        smoothed
    }
}
