//! End-to-end batch runs over temporary directories.

use gaze_batch::{BatchConfig, BatchRunner, GazeTable, RecordingSummary};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SPLIT_HEADER: &str = "timestamp,left_gaze_x,left_gaze_y,left_gaze_point_validity,right_gaze_x,right_gaze_y,right_gaze_point_validity,stimuli";

/// 10 still frames, a 2-frame gap, 10 still frames, a 6-frame blink, 10
/// frames at a new location. Right eye is missing throughout.
fn split_recording() -> String {
    let mut lines = vec![SPLIT_HEADER.to_string()];
    for i in 0..38 {
        let stimulus = if i < 12 { "Cross" } else { "cat.jpg" };
        let row = match i {
            10 | 11 | 22..=27 => format!("{i},,,0,,,0,{stimulus}"),
            28.. => format!("{i},0.8,0.2,1,,,0,{stimulus}"),
            _ => format!("{i},0.4,0.6,1,,,0,{stimulus}"),
        };
        lines.push(row);
    }
    lines.join("\n") + "\n"
}

/// Tracker-native tuple cells, right eye better than left
fn tuple_recording() -> String {
    let mut lines = vec![
        "time,left_gaze_point_on_display_area,left_gaze_point_validity,right_gaze_point_on_display_area,right_gaze_point_validity"
            .to_string(),
    ];
    for i in 0..12 {
        let left = if i % 3 == 0 { "\"(0.5, 0.5)\",1" } else { "\"(nan, nan)\",0" };
        lines.push(format!("{i},{left},\"(0.3, 0.7)\",1"));
    }
    lines.join("\n") + "\n"
}

struct Dirs {
    input: TempDir,
    output: TempDir,
}

impl Dirs {
    fn new() -> Self {
        Self {
            input: tempfile::tempdir().unwrap(),
            output: tempfile::tempdir().unwrap(),
        }
    }

    fn add(&self, name: &str, contents: &str) {
        fs::write(self.input.path().join(name), contents).unwrap();
    }

    fn config(&self) -> BatchConfig {
        BatchConfig {
            input_dir: self.input.path().to_path_buf(),
            output_dir: self.output.path().to_path_buf(),
            ..Default::default()
        }
    }
}

fn read_output(path: &Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

fn cell(row: &csv::StringRecord, col: usize) -> f64 {
    row[col].parse().unwrap()
}

#[test]
fn test_split_layout_end_to_end() {
    let dirs = Dirs::new();
    dirs.add("p01.csv", &split_recording());

    let report = BatchRunner::new(dirs.config()).unwrap().run().unwrap();
    assert_eq!(report.processed, vec!["p01".to_string()]);
    assert!(report.is_success());

    let out = dirs.output.path().join("p01.csv");
    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.len(), 12);
    assert_eq!(&headers[8], "eye_to_use");
    assert_eq!(&headers[9], "eye_state");

    let rows = read_output(&out);
    assert_eq!(rows.len(), 38);

    // Short gap interpolated on the chosen eye
    assert_eq!(&rows[10][3], "2");
    assert_eq!(&rows[10][1], "0.4");
    assert_eq!(&rows[10][9], "Fixation");

    // Long gap is a blink with empty centroid
    for row in &rows[22..28] {
        assert_eq!(&row[3], "0");
        assert_eq!(&row[9], "Blink");
        assert_eq!(&row[10], "");
        assert_eq!(&row[11], "");
    }

    // Stimulus column passed through
    assert_eq!(&rows[0][7], "Cross");
    assert_eq!(&rows[37][7], "cat.jpg");

    for row in &rows {
        assert_eq!(&row[8], "left");
        let is_fixation = &row[9] == "Fixation";
        assert_eq!(!row[10].is_empty(), is_fixation);
    }
    assert!((cell(&rows[30], 10) - 0.8).abs() < 1e-12);
}

#[test]
fn test_tuple_layout_picks_better_eye() {
    let dirs = Dirs::new();
    dirs.add("p02.csv", &tuple_recording());

    BatchRunner::new(dirs.config()).unwrap().run().unwrap();

    let rows = read_output(&dirs.output.path().join("p02.csv"));
    assert_eq!(rows.len(), 12);
    for row in &rows {
        assert_eq!(&row[5], "right");
        assert_eq!(&row[6], "Fixation");
        assert!((cell(row, 7) - 0.3).abs() < 1e-12);
        assert!((cell(row, 8) - 0.7).abs() < 1e-12);
    }
    // The unused eye is untouched
    assert_eq!(&rows[1][1], "(nan, nan)");
    assert_eq!(&rows[0][1], "(0.5, 0.5)");
}

#[test]
fn test_malformed_cells_do_not_stop_processing() {
    let dirs = Dirs::new();
    let mut data = split_recording();
    data = data.replacen("\n3,0.4,0.6,1,", "\n3,0.4,garbage,1,", 1);
    dirs.add("p03.csv", &data);

    let report = BatchRunner::new(dirs.config()).unwrap().run().unwrap();
    assert!(report.is_success());

    let rows = read_output(&dirs.output.path().join("p03.csv"));
    // Single bad sample is treated as missing and filled from its neighbours
    assert_eq!(&rows[3][2], "0.6");
    assert_eq!(&rows[3][3], "2");
}

#[test]
fn test_failed_recording_writes_nothing_and_others_continue() {
    let dirs = Dirs::new();
    dirs.add("bad.csv", "timestamp,left_gaze_x\n0,0.5\n");
    dirs.add("good.csv", &split_recording());

    let report = BatchRunner::new(dirs.config()).unwrap().run().unwrap();
    assert_eq!(report.processed, vec!["good".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "bad");
    assert!(report.failed[0].1.contains("left_gaze_point_validity"));

    assert!(!dirs.output.path().join("bad.csv").exists());
    assert!(dirs.output.path().join("good.csv").exists());
    // No temporary files left behind
    assert_eq!(fs::read_dir(dirs.output.path()).unwrap().count(), 1);
}

#[test]
fn test_processed_recordings_are_skipped() {
    let dirs = Dirs::new();
    dirs.add("p01.csv", &split_recording());
    dirs.add("p02.csv", &tuple_recording());
    fs::write(dirs.output.path().join("p01.csv"), "already here").unwrap();

    let report = BatchRunner::new(dirs.config()).unwrap().run().unwrap();
    assert_eq!(report.processed, vec!["p02".to_string()]);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        fs::read_to_string(dirs.output.path().join("p01.csv")).unwrap(),
        "already here"
    );

    let again = BatchRunner::new(dirs.config()).unwrap().run().unwrap();
    assert!(again.processed.is_empty());
    assert_eq!(again.skipped, 2);
}

#[test]
fn test_parallel_workers_and_summaries() {
    let dirs = Dirs::new();
    for i in 0..6 {
        dirs.add(&format!("s{i}.csv"), &split_recording());
    }
    let config = BatchConfig {
        workers: 3,
        write_summaries: true,
        ..dirs.config()
    };

    let report = BatchRunner::new(config).unwrap().run().unwrap();
    assert_eq!(report.processed.len(), 6);

    let summary: RecordingSummary =
        serde_json::from_str(&fs::read_to_string(dirs.output.path().join("s0.summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary.id, "s0");
    assert_eq!(summary.samples, 38);
    assert_eq!(summary.stats.interpolated, 2);
    assert_eq!(summary.overall.blink, 6);
    assert_eq!(summary.stimuli.len(), 2);
    assert_eq!(summary.stimuli[0].stimulus, "Cross");

    // Outputs of identical inputs are identical
    let first = fs::read_to_string(dirs.output.path().join("s0.csv")).unwrap();
    let last = fs::read_to_string(dirs.output.path().join("s5.csv")).unwrap();
    assert_eq!(first, last);
}

#[test]
fn test_annotated_output_reloads() {
    let dirs = Dirs::new();
    dirs.add("p01.csv", &split_recording());
    BatchRunner::new(dirs.config()).unwrap().run().unwrap();

    let table = GazeTable::read(dirs.output.path().join("p01.csv")).unwrap();
    assert_eq!(table.len(), 38);
    let recording = table.to_recording();
    assert_eq!(recording.samples[11].left.validity, gaze_core::Validity::Interpolated);
}

#[test]
fn test_failed_summary_leaves_no_table() {
    let dirs = Dirs::new();
    dirs.add("p01.csv", &split_recording());
    // A non-empty directory where the summary should go
    let blocker = dirs.output.path().join("p01.summary.json");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), "x").unwrap();

    let config = BatchConfig {
        write_summaries: true,
        ..dirs.config()
    };
    let report = BatchRunner::new(config.clone()).unwrap().run().unwrap();
    assert!(report.processed.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "p01");
    assert!(!dirs.output.path().join("p01.csv").exists());
    assert_eq!(fs::read_dir(dirs.output.path()).unwrap().count(), 1);

    // Once the blocker is gone the recording is still pending
    fs::remove_dir_all(&blocker).unwrap();
    let report = BatchRunner::new(config).unwrap().run().unwrap();
    assert_eq!(report.processed, vec!["p01".to_string()]);
    assert!(dirs.output.path().join("p01.csv").exists());
    assert!(dirs.output.path().join("p01.summary.json").is_file());
}
