//! Per-stimulus summaries of a classified recording.
//!
//! These are the inputs of the state pie charts and scanpath plots: how
//! the observer's time splits across states while a stimulus was shown, and
//! the ordered fixations with their durations.

use gaze_core::{EyeState, GazePoint};
use serde::{Deserialize, Serialize};

use crate::pipeline::{AnnotatedRecording, AnnotatedSample};

/// Sample counts per state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDistribution {
    pub fixation: usize,
    pub saccade: usize,
    pub blink: usize,
    pub error: usize,
}

impl StateDistribution {
    pub fn add(&mut self, state: EyeState) {
        match state {
            EyeState::Fixation => self.fixation += 1,
            EyeState::Saccade => self.saccade += 1,
            EyeState::Blink => self.blink += 1,
            EyeState::Error => self.error += 1,
        }
    }

    pub fn count(&self, state: EyeState) -> usize {
        match state {
            EyeState::Fixation => self.fixation,
            EyeState::Saccade => self.saccade,
            EyeState::Blink => self.blink,
            EyeState::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        self.fixation + self.saccade + self.blink + self.error
    }

    /// Share of samples in `state`; zero for an empty distribution
    pub fn proportion(&self, state: EyeState) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(state) as f64 / total as f64,
        }
    }
}

/// One stop on the scanpath
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanpathFixation {
    pub centroid: GazePoint,
    /// First sample of the fixation shown with the stimulus
    pub start: usize,
    pub frames: usize,
    pub duration_ms: f64,
}

impl AnnotatedRecording {
    /// Distinct stimulus labels in order of first appearance
    pub fn stimuli(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for label in self.samples.iter().filter_map(|s| s.sample.stimulus.as_deref()) {
            if !seen.iter().any(|l| l == label) {
                seen.push(label.to_string());
            }
        }
        seen
    }

    /// State counts, optionally restricted to one stimulus
    pub fn state_distribution(&self, stimulus: Option<&str>) -> StateDistribution {
        let mut distribution = StateDistribution::default();
        for sample in self.samples.iter().filter(|s| shown_with(s, stimulus)) {
            distribution.add(sample.state);
        }
        distribution
    }

    /// Fixations in time order, optionally restricted to one stimulus.
    ///
    /// A fixation spanning a stimulus change contributes only its frames
    /// shown with the requested stimulus.
    pub fn scanpath(&self, stimulus: Option<&str>) -> Vec<ScanpathFixation> {
        self.fixations
            .iter()
            .filter_map(|run| {
                let mut shown = (run.start..run.end).filter(|&i| shown_with(&self.samples[i], stimulus));
                let start = shown.next()?;
                let frames = 1 + shown.count();
                Some(ScanpathFixation {
                    centroid: run.centroid,
                    start,
                    frames,
                    duration_ms: frames as f64 * 1000.0 / self.sampling_rate_hz,
                })
            })
            .collect()
    }
}

fn shown_with(sample: &AnnotatedSample, stimulus: Option<&str>) -> bool {
    match stimulus {
        Some(label) => sample.sample.stimulus.as_deref() == Some(label),
        None => true,
    }
}
