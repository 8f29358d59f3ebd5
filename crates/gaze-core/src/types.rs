//! Fundamental types for gaze recordings.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Gaze position in normalized display coordinates ([0, 1] on both axes,
/// origin at the top-left corner of the display area)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazePoint {
    pub x: f64,
    pub y: f64,
}

impl GazePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`; `alpha = 0` yields `self`
    pub fn lerp(&self, other: &Self, alpha: f64) -> Self {
        Self::new(
            self.x + alpha * (other.x - self.x),
            self.y + alpha * (other.y - self.y),
        )
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for GazePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tri-state validity of one eye's gaze sample.
///
/// The numeric codes match the tracker export: `0` missing, `1` observed.
/// `2` is assigned by gap interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Validity {
    Invalid = 0,
    Valid = 1,
    Interpolated = 2,
}

impl Validity {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Invalid),
            1 => Some(Self::Valid),
            2 => Some(Self::Interpolated),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Validity::Invalid)
    }
}

/// Eye channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub fn as_str(&self) -> &'static str {
        match self {
            Eye::Left => "left",
            Eye::Right => "right",
        }
    }
}

impl fmt::Display for Eye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Eye {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Eye::Left),
            "right" => Ok(Eye::Right),
            other => Err(Error::InvalidInput(format!("unknown eye: {other:?}"))),
        }
    }
}

/// Behavioral state assigned to every sample by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EyeState {
    Fixation,
    Saccade,
    Blink,
    Error,
}

impl EyeState {
    pub const ALL: [EyeState; 4] = [
        EyeState::Fixation,
        EyeState::Saccade,
        EyeState::Blink,
        EyeState::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EyeState::Fixation => "Fixation",
            EyeState::Saccade => "Saccade",
            EyeState::Blink => "Blink",
            EyeState::Error => "Error",
        }
    }
}

impl fmt::Display for EyeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EyeState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EyeState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unknown eye state: {s:?}")))
    }
}

/// One eye's measurement for a single sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeChannel {
    /// `None` is the missing sentinel, distinct from `(0, 0)`
    pub point: Option<GazePoint>,
    pub validity: Validity,
}

impl EyeChannel {
    pub fn new(point: Option<GazePoint>, validity: Validity) -> Self {
        Self { point, validity }
    }

    pub fn valid(x: f64, y: f64) -> Self {
        Self::new(Some(GazePoint::new(x, y)), Validity::Valid)
    }

    pub fn missing() -> Self {
        Self::new(None, Validity::Invalid)
    }
}

impl Default for EyeChannel {
    fn default() -> Self {
        Self::missing()
    }
}

/// A single row of a synchronized gaze recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Raw timestamp as exported; ordering is given by the sample index
    pub timestamp: String,
    pub left: EyeChannel,
    pub right: EyeChannel,
    /// Stimulus shown when the sample was taken, if the recording was synced
    pub stimulus: Option<String>,
}

impl Sample {
    pub fn new(timestamp: impl Into<String>, left: EyeChannel, right: EyeChannel) -> Self {
        Self {
            timestamp: timestamp.into(),
            left,
            right,
            stimulus: None,
        }
    }

    pub fn with_stimulus(mut self, stimulus: impl Into<String>) -> Self {
        self.stimulus = Some(stimulus.into());
        self
    }

    pub fn channel(&self, eye: Eye) -> &EyeChannel {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }

    pub fn channel_mut(&mut self, eye: Eye) -> &mut EyeChannel {
        match eye {
            Eye::Left => &mut self.left,
            Eye::Right => &mut self.right,
        }
    }
}

/// A complete session of gaze samples in time order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: String,
    pub samples: Vec<Sample>,
}

impl Recording {
    pub fn new(id: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            id: id.into(),
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of directly observed samples for the given eye
    pub fn valid_count(&self, eye: Eye) -> usize {
        self.samples
            .iter()
            .filter(|s| s.channel(eye).validity == Validity::Valid)
            .count()
    }
}
