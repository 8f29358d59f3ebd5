//! Screen geometry: normalized display coordinates to physical distance and
//! visual angle.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::GazePoint;

/// Physical layout of the stimulus display relative to the observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenGeometry {
    /// Width of the display area (mm)
    pub width_mm: f64,
    /// Height of the display area (mm)
    pub height_mm: f64,
    /// Distance from the eye to the screen plane (mm)
    pub eye_distance_mm: f64,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        // 27" 16:9 lab monitor at 65 cm
        Self {
            width_mm: 596.7,
            height_mm: 335.7,
            eye_distance_mm: 650.0,
        }
    }
}

impl ScreenGeometry {
    pub fn new(width_mm: f64, height_mm: f64, eye_distance_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            eye_distance_mm,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("screen.width_mm", self.width_mm),
            ("screen.height_mm", self.height_mm),
            ("screen.eye_distance_mm", self.eye_distance_mm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Vector from `from` to `to` on the screen plane, in millimetres
    pub fn offset_mm(&self, from: &GazePoint, to: &GazePoint) -> Vector2<f64> {
        let delta = to.to_nalgebra() - from.to_nalgebra();
        Vector2::new(delta.x * self.width_mm, delta.y * self.height_mm)
    }

    pub fn displacement_mm(&self, from: &GazePoint, to: &GazePoint) -> f64 {
        self.offset_mm(from, to).norm()
    }

    /// Visual angle subtended by a displacement on the screen (degrees)
    pub fn visual_angle_deg(&self, displacement_mm: f64) -> f64 {
        (displacement_mm / self.eye_distance_mm).atan().to_degrees()
    }

    /// Inverse of [`visual_angle_deg`](Self::visual_angle_deg)
    pub fn displacement_for_angle_mm(&self, angle_deg: f64) -> f64 {
        self.eye_distance_mm * angle_deg.to_radians().tan()
    }

    /// Angular velocity between two consecutive samples (degrees/second)
    pub fn angular_velocity(&self, from: &GazePoint, to: &GazePoint, sampling_rate_hz: f64) -> f64 {
        self.visual_angle_deg(self.displacement_mm(from, to)) * sampling_rate_hz
    }
}
