//! Batch run configuration.

use gaze_core::{Error, Result};
use gaze_ivt::IvtConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `GAZE_IVT__MAX_GAP=5`
pub const ENV_PREFIX: &str = "GAZE";

/// Complete batch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory of synchronized recordings (`*.csv`)
    pub input_dir: PathBuf,

    /// Directory receiving annotated recordings
    pub output_dir: PathBuf,

    /// Worker threads; 0 lets rayon decide
    pub workers: usize,

    /// Also write a `<id>.summary.json` next to every annotated table
    pub write_summaries: bool,

    /// Classifier thresholds and screen geometry
    pub ivt: IvtConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Data/Synced"),
            output_dir: PathBuf::from("Data/Processed"),
            workers: 0,
            write_summaries: false,
            ivt: IvtConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Load configuration from an optional file, overlaid with `GAZE_*`
    /// environment variables.
    ///
    /// Values are not validated here so that callers can apply overrides
    /// first; see [`validate`](Self::validate).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(Error::Config("input_dir must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("output_dir must not be empty".into()));
        }
        if self.input_dir == self.output_dir {
            return Err(Error::Config(format!(
                "input_dir and output_dir are the same directory: {}",
                self.input_dir.display()
            )));
        }
        self.ivt.validate()
    }
}
