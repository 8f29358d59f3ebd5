//! Choice of the eye channel used for the whole recording.

use gaze_core::{Eye, Recording};
use serde::{Deserialize, Serialize};

/// Outcome of eye selection, kept for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EyeSelection {
    pub eye: Eye,
    pub left_valid: usize,
    pub right_valid: usize,
}

/// Picks the channel with strictly more directly observed samples.
///
/// Ties go to the left eye, which also covers the empty recording.
pub fn select_eye(recording: &Recording) -> EyeSelection {
    let left_valid = recording.valid_count(Eye::Left);
    let right_valid = recording.valid_count(Eye::Right);

    let eye = if right_valid > left_valid {
        Eye::Right
    } else {
        Eye::Left
    };

    EyeSelection {
        eye,
        left_valid,
        right_valid,
    }
}
