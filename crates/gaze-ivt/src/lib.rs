//! # Gaze-IVT
//!
//! Eye-state classification for screen-based eye-tracking recordings.
//!
//! Every sample of a recording is labeled as one of `Fixation`, `Saccade`,
//! `Blink` or `Error`, and every fixation sample carries the centroid of
//! the fixation it belongs to.
//!
//! ## Pipeline Stages
//!
//! 1. **Eye selection**: Pick the eye with more valid samples
//! 2. **Interpolation**: Fill short gaps linearly between valid neighbours
//! 3. **Blink detection**: Label long gaps as blinks, short ones as errors
//! 4. **Velocity classification**: Angular velocity against the saccade threshold
//! 5. **Fixation aggregation**: Minimum duration check and centroids
//! 6. **Smoothing**: Merge isolated errors inside saccades
//!
//! [`summary`] derives per-stimulus state distributions and scanpaths from
//! the classified output.

pub mod blink;
pub mod config;
pub mod eye_selector;
pub mod fixation;
pub mod interpolation;
pub mod pipeline;
pub mod runs;
pub mod smoother;
pub mod summary;
pub mod velocity;

#[cfg(test)]
mod testing;

pub use blink::*;
pub use config::*;
pub use eye_selector::*;
pub use fixation::*;
pub use interpolation::*;
pub use pipeline::*;
pub use runs::*;
pub use smoother::*;
pub use summary::*;
pub use velocity::*;
