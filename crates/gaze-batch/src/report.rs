//! Per-recording summary documents.

use gaze_core::Eye;
use gaze_ivt::{AnnotatedRecording, PipelineStats, ScanpathFixation, StateDistribution};
use serde::{Deserialize, Serialize};

/// State distribution and scanpath for one stimulus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusSummary {
    pub stimulus: String,
    pub distribution: StateDistribution,
    pub scanpath: Vec<ScanpathFixation>,
}

/// Everything the plotting scripts need from one classified recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingSummary {
    pub id: String,
    pub eye_to_use: Eye,
    pub samples: usize,
    pub stats: PipelineStats,
    pub overall: StateDistribution,
    pub stimuli: Vec<StimulusSummary>,
}

impl RecordingSummary {
    pub fn from_annotated(annotated: &AnnotatedRecording) -> Self {
        let stimuli = annotated
            .stimuli()
            .into_iter()
            .map(|stimulus| StimulusSummary {
                distribution: annotated.state_distribution(Some(stimulus.as_str())),
                scanpath: annotated.scanpath(Some(stimulus.as_str())),
                stimulus,
            })
            .collect();

        Self {
            id: annotated.id.clone(),
            eye_to_use: annotated.eye_to_use(),
            samples: annotated.len(),
            stats: annotated.stats,
            overall: annotated.state_distribution(None),
            stimuli,
        }
    }
}
