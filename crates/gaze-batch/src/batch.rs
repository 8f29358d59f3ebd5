//! Batch processing of synchronized recordings.
//!
//! Recordings already present in the output directory are skipped, so an
//! interrupted run can simply be restarted. Independent recordings are
//! classified in parallel; a failing recording is logged and does not stop
//! the others.

use gaze_core::{Error, Result};
use gaze_ivt::{AnnotatedRecording, IvtPipeline};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::BatchConfig;
use crate::output::stage;
use crate::report::RecordingSummary;
use crate::table::GazeTable;

/// Outcome of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Recording ids written
    pub processed: Vec<String>,
    /// Recording ids with the error that stopped them
    pub failed: Vec<(String, String)>,
    /// Inputs with an existing output
    pub skipped: usize,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn is_csv(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
}

fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_csv(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Input tables without a counterpart of the same name in `output_dir`,
/// in file name order
pub fn pending_recordings(input_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(Error::Config(format!(
            "input directory does not exist: {}",
            input_dir.display()
        )));
    }

    let pending = csv_files(input_dir)?
        .into_iter()
        .filter(|path| match path.file_name() {
            Some(name) => !output_dir.join(name).exists(),
            None => false,
        })
        .collect();
    Ok(pending)
}

/// Runs the pipeline over files and writes the annotated tables
pub struct BatchRunner {
    config: BatchConfig,
    pipeline: IvtPipeline,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;
        let pipeline = IvtPipeline::new(config.ivt.clone())?;
        Ok(Self { config, pipeline })
    }

    /// Classify one table and write it to the output directory.
    ///
    /// Every output of the recording is staged before any is persisted.
    /// The annotated table goes last since its presence marks the
    /// recording as done.
    pub fn process_file(&self, input: &Path) -> Result<AnnotatedRecording> {
        let table = GazeTable::read(input)?;
        let annotated = self.pipeline.process(&table.to_recording())?;

        let file_name = input
            .file_name()
            .ok_or_else(|| Error::InvalidInput(format!("not a file: {}", input.display())))?;
        let target = self.config.output_dir.join(file_name);
        let staged_table = stage(&target, |w| table.write_annotated(&annotated, w))?;

        if self.config.write_summaries {
            let summary = RecordingSummary::from_annotated(&annotated);
            let summary_path = self.config.output_dir.join(format!("{}.summary.json", table.id));
            stage(&summary_path, |w| {
                serde_json::to_writer_pretty(w, &summary)?;
                Ok(())
            })?
            .persist()?;
        }

        staged_table.persist()?;
        Ok(annotated)
    }

    /// Process every pending recording
    pub fn run(&self) -> Result<BatchReport> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let pending = pending_recordings(&self.config.input_dir, &self.config.output_dir)?;
        let inputs = csv_files(&self.config.input_dir)?;
        let mut report = BatchReport {
            skipped: inputs.len().saturating_sub(pending.len()),
            ..Default::default()
        };

        info!(
            pending = pending.len(),
            skipped = report.skipped,
            input = %self.config.input_dir.display(),
            "starting batch"
        );
        let start = Instant::now();

        let results = self.in_pool(|| {
            pending
                .par_iter()
                .map(|path| (path, self.process_file(path).map(drop)))
                .collect::<Vec<_>>()
        })?;

        for (path, result) in results {
            let id = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            match result {
                Ok(()) => report.processed.push(id),
                Err(e) => {
                    warn!(recording = %id, error = %e, "recording failed, skipping");
                    report.failed.push((id, e.to_string()));
                }
            }
        }

        info!(
            processed = report.processed.len(),
            failed = report.failed.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch finished"
        );
        Ok(report)
    }

    fn in_pool<T: Send>(&self, op: impl FnOnce() -> T + Send) -> Result<T> {
        if self.config.workers == 0 {
            return Ok(op());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(pool.install(op))
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}
