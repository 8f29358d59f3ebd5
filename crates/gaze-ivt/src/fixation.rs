//! Fixation run aggregation and centroid computation.

use gaze_core::{Eye, EyeState, GazePoint, Sample};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FixationBoundary;
use crate::runs::runs_where;

/// A fixation that met the minimum-duration requirement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixationRun {
    /// First sample index
    pub start: usize,
    /// One past the last sample index
    pub end: usize,
    pub centroid: GazePoint,
}

impl FixationRun {
    pub fn frames(&self) -> usize {
        self.end - self.start
    }

    pub fn duration_ms(&self, sampling_rate_hz: f64) -> f64 {
        self.frames() as f64 * 1000.0 / sampling_rate_hz
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Per-sample centroids plus the qualifying runs
#[derive(Debug, Clone, Default)]
pub struct FixationOutcome {
    pub centroids: Vec<Option<GazePoint>>,
    pub runs: Vec<FixationRun>,
    /// Samples relabeled `Error` because their run was too short
    pub demoted: usize,
}

#[derive(Debug, Clone)]
pub struct FixationAggregator {
    pub min_frames: usize,
    pub boundary: FixationBoundary,
}

impl FixationAggregator {
    pub fn new(min_frames: usize, boundary: FixationBoundary) -> Self {
        Self {
            min_frames,
            boundary,
        }
    }

    /// Group `Fixation` runs, assign centroids to qualifying runs and
    /// relabel the rest as `Error`.
    ///
    /// The centroid is the mean position of the run's samples that carry a
    /// coordinate. A run with no coordinates at all cannot have a centroid
    /// and is demoted regardless of its length.
    pub fn aggregate(&self, samples: &[Sample], eye: Eye, states: &mut [EyeState]) -> FixationOutcome {
        let mut outcome = FixationOutcome {
            centroids: vec![None; states.len()],
            ..Default::default()
        };

        for run in runs_where(states, |s| *s == EyeState::Fixation) {
            let centroid = if self.boundary.qualifies(run.len(), self.min_frames) {
                mean_point(samples[run.clone()].iter().filter_map(|s| s.channel(eye).point))
            } else {
                None
            };

            match centroid {
                Some(centroid) => {
                    outcome.centroids[run.clone()].fill(Some(centroid));
                    outcome.runs.push(FixationRun {
                        start: run.start,
                        end: run.end,
                        centroid,
                    });
                }
                None => {
                    outcome.demoted += run.len();
                    states[run].fill(EyeState::Error);
                }
            }
        }

        debug!(
            fixations = outcome.runs.len(),
            demoted = outcome.demoted,
            "fixation aggregation done"
        );
        outcome
    }
}

fn mean_point(points: impl Iterator<Item = GazePoint>) -> Option<GazePoint> {
    let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
        count += 1;
    }

    if count > 0 {
        Some(GazePoint::new(sum_x / count as f64, sum_y / count as f64))
    } else {
        None
    }
}
