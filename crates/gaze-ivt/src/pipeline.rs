//! Complete I-VT classification pipeline.
//!
//! Runs every stage over one recording in a fixed order:
//!
//! eye selection → gap interpolation → blink detection → velocity
//! classification → fixation aggregation → smoothing
//!
//! The pipeline holds only configuration, so one instance can be shared by
//! workers processing different recordings concurrently.

use gaze_core::{Eye, EyeState, GazePoint, Recording, Result, Sample, Validity};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::blink::BlinkDetector;
use crate::config::IvtConfig;
use crate::eye_selector::{select_eye, EyeSelection};
use crate::fixation::{FixationAggregator, FixationRun};
use crate::interpolation::GapInterpolator;
use crate::smoother::StateSmoother;
use crate::velocity::VelocityClassifier;

/// A sample after classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSample {
    /// The sample with the chosen eye's gaps filled
    pub sample: Sample,
    pub state: EyeState,
    /// Present iff `state == Fixation`
    pub fixation_centroid: Option<GazePoint>,
}

/// Per-stage counters for one recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub interpolated: usize,
    pub demoted_fixation_samples: usize,
    pub smoothed: usize,
}

/// Classified recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecording {
    pub id: String,
    pub eye_selection: EyeSelection,
    pub sampling_rate_hz: f64,
    pub samples: Vec<AnnotatedSample>,
    pub fixations: Vec<FixationRun>,
    pub stats: PipelineStats,
}

impl AnnotatedRecording {
    pub fn eye_to_use(&self) -> Eye {
        self.eye_selection.eye
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = EyeState> + '_ {
        self.samples.iter().map(|s| s.state)
    }

    /// Validity of the chosen eye after interpolation
    pub fn validity(&self, index: usize) -> Option<Validity> {
        self.samples
            .get(index)
            .map(|s| s.sample.channel(self.eye_to_use()).validity)
    }
}

/// The I-VT classification pipeline
pub struct IvtPipeline {
    config: IvtConfig,
    interpolator: GapInterpolator,
    blink: BlinkDetector,
    velocity: VelocityClassifier,
    fixation: FixationAggregator,
    smoother: StateSmoother,
}

impl IvtPipeline {
    /// Build a pipeline, rejecting invalid configuration up front
    pub fn new(config: IvtConfig) -> Result<Self> {
        config.validate()?;

        let interpolator = GapInterpolator::new(config.max_gap);
        let blink = BlinkDetector::new(config.blink_threshold);
        let velocity = VelocityClassifier::new(
            config.screen,
            config.sampling_rate_hz,
            config.saccade_threshold_deg_s,
        );
        let fixation = FixationAggregator::new(config.fixation_min_frames, config.fixation_boundary);

        Ok(Self {
            config,
            interpolator,
            blink,
            velocity,
            fixation,
            smoother: StateSmoother::new(),
        })
    }

    /// Classify one recording. The input is left untouched.
    pub fn process(&self, recording: &Recording) -> Result<AnnotatedRecording> {
        let eye_selection = select_eye(recording);
        let eye = eye_selection.eye;

        let mut samples = recording.samples.clone();
        let mut stats = PipelineStats::default();

        stats.interpolated = self.interpolator.interpolate(&mut samples, eye);

        let labels = self.blink.detect(&samples, eye);
        let mut states = self.velocity.classify(&samples, eye, labels);

        let outcome = self.fixation.aggregate(&samples, eye, &mut states);
        stats.demoted_fixation_samples = outcome.demoted;

        stats.smoothed = self.smoother.smooth(&mut states);

        let annotated: Vec<AnnotatedSample> = samples
            .into_iter()
            .zip(states)
            .zip(outcome.centroids)
            .map(|((sample, state), fixation_centroid)| AnnotatedSample {
                sample,
                state,
                fixation_centroid,
            })
            .collect();

        info!(
            recording = %recording.id,
            samples = annotated.len(),
            eye = %eye,
            fixations = outcome.runs.len(),
            interpolated = stats.interpolated,
            "recording classified"
        );

        Ok(AnnotatedRecording {
            id: recording.id.clone(),
            eye_selection,
            sampling_rate_hz: self.config.sampling_rate_hz,
            samples: annotated,
            fixations: outcome.runs,
            stats,
        })
    }

    /// Get current configuration
    pub fn config(&self) -> &IvtConfig {
        &self.config
    }
}
