//! # Gaze-Batch
//!
//! Offline batch adapter around the I-VT pipeline.
//!
//! Reads synchronized gaze tables from an input directory, classifies every
//! recording that has no output yet and writes annotated tables (and
//! optional JSON summaries) to the output directory.
//!
//! ## Output columns
//!
//! Every input column is kept. The chosen eye's coordinates and validity are
//! replaced by their post-interpolation values (validity `0`/`1`/`2`), then
//! `eye_to_use`, `eye_state`, `fixation_centroid_x` and `fixation_centroid_y`
//! are appended.

pub mod batch;
pub mod config;
pub mod output;
pub mod report;
pub mod table;

pub use batch::*;
pub use config::*;
pub use report::*;
pub use table::*;
