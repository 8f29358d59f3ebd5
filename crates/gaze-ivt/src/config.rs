//! Classifier configuration.
//!
//! Every threshold the pipeline uses lives here. Historical deployments of
//! the analysis disagreed on several of them (gap length 4 vs 5, blink run
//! 5 vs 6, saccade threshold 20 vs 30 deg/s, `>` vs `>=` for fixation
//! length); all of those are configuration, never literals in the stages.

use gaze_core::{Error, Result, ScreenGeometry};
use serde::{Deserialize, Serialize};

/// How the minimum fixation length is compared against a run's length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixationBoundary {
    /// Run qualifies when `len >= fixation_min_frames`
    #[default]
    Inclusive,
    /// Run qualifies when `len > fixation_min_frames`
    Exclusive,
}

impl FixationBoundary {
    pub fn qualifies(&self, run_len: usize, min_frames: usize) -> bool {
        match self {
            FixationBoundary::Inclusive => run_len >= min_frames,
            FixationBoundary::Exclusive => run_len > min_frames,
        }
    }
}

/// Configuration for the I-VT classification pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvtConfig {
    /// Display size and viewing distance
    pub screen: ScreenGeometry,

    /// Tracker sampling rate (Hz)
    pub sampling_rate_hz: f64,

    /// Longest run of missing samples that is filled by interpolation
    pub max_gap: usize,

    /// Runs of missing samples at least this long are blinks
    pub blink_threshold: usize,

    /// Angular velocity at or above which a sample is a saccade (deg/s)
    pub saccade_threshold_deg_s: f64,

    /// Minimum fixation length (frames)
    pub fixation_min_frames: usize,
    pub fixation_boundary: FixationBoundary,
}

impl Default for IvtConfig {
    fn default() -> Self {
        Self {
            screen: ScreenGeometry::default(),
            sampling_rate_hz: 60.0,
            max_gap: 4,
            blink_threshold: 5,
            saccade_threshold_deg_s: 30.0,
            fixation_min_frames: 6, // 100ms at 60Hz
            fixation_boundary: FixationBoundary::Inclusive,
        }
    }
}

impl IvtConfig {
    /// Reject missing or non-positive constants before any stage runs
    pub fn validate(&self) -> Result<()> {
        self.screen.validate()?;

        for (name, value) in [
            ("sampling_rate_hz", self.sampling_rate_hz),
            ("saccade_threshold_deg_s", self.saccade_threshold_deg_s),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("max_gap", self.max_gap),
            ("blink_threshold", self.blink_threshold),
            ("fixation_min_frames", self.fixation_min_frames),
        ] {
            if value == 0 {
                return Err(Error::Config(format!("{name} must be at least 1")));
            }
        }

        Ok(())
    }

    /// Duration of one sample (ms)
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.sampling_rate_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IvtConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.frame_duration_ms() * config.fixation_min_frames as f64 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_constants() {
        let cases: [fn(&mut IvtConfig); 7] = [
            |c| c.sampling_rate_hz = 0.0,
            |c| c.saccade_threshold_deg_s = -5.0,
            |c| c.max_gap = 0,
            |c| c.blink_threshold = 0,
            |c| c.fixation_min_frames = 0,
            |c| c.screen.eye_distance_mm = 0.0,
            |c| c.sampling_rate_hz = f64::INFINITY,
        ];

        for mutate in cases {
            let mut config = IvtConfig::default();
            mutate(&mut config);
            assert!(
                matches!(config.validate(), Err(Error::Config(_))),
                "config should be rejected: {config:?}"
            );
        }
    }

    #[test]
    fn test_fixation_boundary_policies() {
        assert!(FixationBoundary::Inclusive.qualifies(6, 6));
        assert!(!FixationBoundary::Inclusive.qualifies(5, 6));
        assert!(!FixationBoundary::Exclusive.qualifies(6, 6));
        assert!(FixationBoundary::Exclusive.qualifies(7, 6));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IvtConfig =
            serde_json::from_str(r#"{"max_gap": 5, "fixation_boundary": "exclusive"}"#).unwrap();
        assert_eq!(config.max_gap, 5);
        assert_eq!(config.fixation_boundary, FixationBoundary::Exclusive);
        assert_eq!(config.blink_threshold, 5);
    }
}
