//! # Gaze-Core
//!
//! Core types and utilities for classifying eye-tracker recordings captured
//! during static image presentation.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
