//! Identification by Velocity Threshold (I-VT).
//!
//! The velocity of sample `i` is the angular speed of the step from `i` to
//! `i + 1`: the on-screen displacement is converted to millimetres, then to
//! the visual angle it subtends at the configured viewing distance, and
//! multiplied by the sampling rate.
//!
//! A sample is a saccade when `velocity >= threshold`. Samples already
//! labeled by blink detection are skipped. Samples without a velocity (the
//! last sample, or either endpoint lacking a coordinate) are not saccades
//! and fall through to the `Fixation` default like every other unset sample.

use gaze_core::{Eye, EyeState, Sample, ScreenGeometry};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct VelocityClassifier {
    pub geometry: ScreenGeometry,
    pub sampling_rate_hz: f64,
    /// Saccade threshold (deg/s)
    pub threshold_deg_s: f64,
}

impl VelocityClassifier {
    pub fn new(geometry: ScreenGeometry, sampling_rate_hz: f64, threshold_deg_s: f64) -> Self {
        Self {
            geometry,
            sampling_rate_hz,
            threshold_deg_s,
        }
    }

    /// Angular velocity of every sample towards its successor (deg/s)
    pub fn velocities(&self, samples: &[Sample], eye: Eye) -> Vec<Option<f64>> {
        let mut velocities: Vec<Option<f64>> = samples
            .windows(2)
            .map(|w| {
                let from = w[0].channel(eye).point?;
                let to = w[1].channel(eye).point?;
                Some(self.geometry.angular_velocity(&from, &to, self.sampling_rate_hz))
            })
            .collect();

        if !samples.is_empty() {
            velocities.push(None);
        }
        velocities
    }

    pub fn is_saccade(&self, velocity_deg_s: f64) -> bool {
        velocity_deg_s >= self.threshold_deg_s
    }

    /// Resolve provisional labels into final states.
    ///
    /// Unset samples at or above the threshold become `Saccade`; every other
    /// unset sample becomes `Fixation`.
    pub fn classify(
        &self,
        samples: &[Sample],
        eye: Eye,
        labels: Vec<Option<EyeState>>,
    ) -> Vec<EyeState> {
        let velocities = self.velocities(samples, eye);
        let mut saccades = 0;

        let states: Vec<EyeState> = labels
            .into_iter()
            .zip(velocities)
            .map(|(label, velocity)| match (label, velocity) {
                (Some(state), _) => state,
                (None, Some(v)) if self.is_saccade(v) => {
                    saccades += 1;
                    EyeState::Saccade
                }
                (None, _) => EyeState::Fixation,
            })
            .collect();

        debug!(saccades, "velocity classification done");
        states
    }
}
