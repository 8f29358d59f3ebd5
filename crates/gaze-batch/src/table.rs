//! Synchronized gaze tables on disk.
//!
//! Two column layouts are recognized per eye:
//!
//! - split: `left_gaze_x`, `left_gaze_y`, `left_gaze_point_validity`
//! - tuple: `left_gaze_point_on_display_area` holding `(x, y)`, plus
//!   `left_gaze_point_validity`
//!
//! Every other column is kept verbatim and written back out, followed by
//! the classification columns.

use gaze_core::{Error, Eye, EyeChannel, GazePoint, Recording, Result, Sample, Validity};
use gaze_ivt::AnnotatedRecording;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Candidate timestamp columns, in order of preference
pub const TIMESTAMP_COLUMNS: [&str; 4] = ["timestamp", "time", "system_time_stamp", "device_time_stamp"];

pub const STIMULUS_COLUMN: &str = "stimuli";

/// Columns appended to every annotated table
pub const OUTPUT_COLUMNS: [&str; 4] = [
    "eye_to_use",
    "eye_state",
    "fixation_centroid_x",
    "fixation_centroid_y",
];

/// Where one eye's measurement lives in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeColumns {
    Split { x: usize, y: usize, validity: usize },
    Tuple { point: usize, validity: usize },
}

impl EyeColumns {
    fn resolve(headers: &csv::StringRecord, eye: Eye) -> Result<Self> {
        let validity = find_required(headers, &format!("{eye}_gaze_point_validity"))?;

        if let Some(point) = find(headers, &format!("{eye}_gaze_point_on_display_area")) {
            return Ok(EyeColumns::Tuple { point, validity });
        }

        Ok(EyeColumns::Split {
            x: find_required(headers, &format!("{eye}_gaze_x"))?,
            y: find_required(headers, &format!("{eye}_gaze_y"))?,
            validity,
        })
    }

    fn validity(&self) -> usize {
        match *self {
            EyeColumns::Split { validity, .. } | EyeColumns::Tuple { validity, .. } => validity,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    timestamp: Option<usize>,
    stimulus: Option<usize>,
    left: EyeColumns,
    right: EyeColumns,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        Ok(Self {
            timestamp: TIMESTAMP_COLUMNS.iter().find_map(|name| find(headers, name)),
            stimulus: find(headers, STIMULUS_COLUMN),
            left: EyeColumns::resolve(headers, Eye::Left)?,
            right: EyeColumns::resolve(headers, Eye::Right)?,
        })
    }

    fn eye(&self, eye: Eye) -> EyeColumns {
        match eye {
            Eye::Left => self.left,
            Eye::Right => self.right,
        }
    }
}

fn find(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn find_required(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    find(headers, name).ok_or_else(|| Error::MissingColumn {
        column: name.to_string(),
    })
}

/// A loaded table: the raw rows plus the resolved gaze columns
#[derive(Debug, Clone)]
pub struct GazeTable {
    pub id: String,
    headers: csv::StringRecord,
    rows: Vec<csv::StringRecord>,
    columns: ColumnMap,
}

impl GazeTable {
    /// Load a table from disk; the file stem becomes the recording id
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = std::fs::File::open(path)?;
        Self::from_reader(id, file)
    }

    pub fn from_reader<R: io::Read>(id: impl Into<String>, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = ColumnMap::resolve(&headers)?;
        let rows = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

        let id = id.into();
        debug!(recording = %id, rows = rows.len(), columns = headers.len(), "table loaded");
        Ok(Self {
            id,
            headers,
            rows,
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self, eye: Eye) -> EyeColumns {
        self.columns.eye(eye)
    }

    /// Convert rows into samples.
    ///
    /// Unparseable cells become the missing sentinel with `Invalid`
    /// validity and are logged; a sample without a coordinate is never
    /// reported valid.
    pub fn to_recording(&self) -> Recording {
        let samples = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let line = idx + 2; // header is line 1
                let timestamp = match self.columns.timestamp {
                    Some(col) => cell(row, col).to_string(),
                    None => idx.to_string(),
                };
                let stimulus = self
                    .columns
                    .stimulus
                    .and_then(|col| row.get(col))
                    .map(str::trim)
                    .filter(|s| !s.is_empty() && !is_null(s))
                    .map(str::to_string);

                Sample {
                    timestamp,
                    left: self.read_channel(row, line, Eye::Left),
                    right: self.read_channel(row, line, Eye::Right),
                    stimulus,
                }
            })
            .collect();

        Recording::new(self.id.clone(), samples)
    }

    fn read_channel(&self, row: &csv::StringRecord, line: usize, eye: Eye) -> EyeChannel {
        let columns = self.columns.eye(eye);

        let point = match columns {
            EyeColumns::Split { x, y, .. } => {
                let x = self.parse_logged(line, x, cell(row, x), parse_coordinate);
                let y = self.parse_logged(line, y, cell(row, y), parse_coordinate);
                match (x, y) {
                    (Some(Some(x)), Some(Some(y))) => Some(GazePoint::new(x, y)),
                    _ => None,
                }
            }
            EyeColumns::Tuple { point, .. } => self
                .parse_logged(line, point, cell(row, point), parse_point_cell)
                .flatten(),
        };

        let col = columns.validity();
        let validity = self
            .parse_logged(line, col, cell(row, col), parse_validity)
            .unwrap_or(Validity::Invalid);

        match point {
            Some(point) => EyeChannel::new(Some(point), validity),
            None => EyeChannel::missing(),
        }
    }

    /// Run a cell parser, logging and discarding malformed values
    fn parse_logged<T>(
        &self,
        line: usize,
        col: usize,
        value: &str,
        parse: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let parsed = parse(value);
        if parsed.is_none() {
            let err = Error::MalformedCell {
                row: line,
                column: self.headers.get(col).unwrap_or_default().to_string(),
                value: value.to_string(),
            };
            warn!(recording = %self.id, "{err}; treating sample as missing");
        }
        parsed
    }

    /// Serialize the input rows with the chosen eye rewritten and the
    /// classification columns appended.
    pub fn write_annotated<W: io::Write>(&self, annotated: &AnnotatedRecording, writer: W) -> Result<()> {
        if annotated.len() != self.rows.len() {
            return Err(Error::LengthMismatch {
                expected: self.rows.len(),
                actual: annotated.len(),
            });
        }

        // Columns from an earlier run are replaced rather than duplicated
        let existing: Vec<Option<usize>> = OUTPUT_COLUMNS.iter().map(|name| find(&self.headers, name)).collect();
        let mut headers = self.headers.clone();
        for (name, slot) in OUTPUT_COLUMNS.iter().zip(&existing) {
            if slot.is_none() {
                headers.push_field(name);
            }
        }

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&headers)?;

        let eye = annotated.eye_to_use();
        let columns = self.columns.eye(eye);

        for (row, sample) in self.rows.iter().zip(&annotated.samples) {
            let mut fields: Vec<String> = row.iter().map(str::to_string).collect();

            let channel = sample.sample.channel(eye);
            match columns {
                EyeColumns::Split { x, y, validity } => {
                    fields[x] = format_coordinate(channel.point.map(|p| p.x));
                    fields[y] = format_coordinate(channel.point.map(|p| p.y));
                    fields[validity] = channel.validity.code().to_string();
                }
                EyeColumns::Tuple { point, validity } => {
                    fields[point] = match channel.point {
                        Some(p) => p.to_string(),
                        None => "(nan, nan)".to_string(),
                    };
                    fields[validity] = channel.validity.code().to_string();
                }
            }

            let appended = [
                eye.to_string(),
                sample.state.to_string(),
                format_coordinate(sample.fixation_centroid.map(|c| c.x)),
                format_coordinate(sample.fixation_centroid.map(|c| c.y)),
            ];
            for (value, slot) in appended.into_iter().zip(&existing) {
                match slot {
                    Some(col) => fields[*col] = value,
                    None => fields.push(value),
                }
            }

            wtr.write_record(&fields)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn cell(row: &csv::StringRecord, col: usize) -> &str {
    row.get(col).unwrap_or_default()
}

fn is_null(s: &str) -> bool {
    ["nan", "none", "null"].iter().any(|n| s.eq_ignore_ascii_case(n))
}

/// `Some(None)` for an empty or null cell, `None` when unparseable
fn parse_coordinate(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() || is_null(cell) {
        return Some(None);
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
}

/// `(x, y)` tuple cell; a missing component makes the whole point missing
fn parse_point_cell(cell: &str) -> Option<Option<GazePoint>> {
    let cell = cell.trim();
    if cell.is_empty() || is_null(cell) {
        return Some(None);
    }

    let inner = cell.strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    match (parse_coordinate(x)?, parse_coordinate(y)?) {
        (Some(x), Some(y)) => Some(Some(GazePoint::new(x, y))),
        _ => Some(None),
    }
}

/// Accepts integer codes and their float renderings (`1`, `1.0`)
fn parse_validity(cell: &str) -> Option<Validity> {
    let cell = cell.trim();
    let code = match cell.parse::<u8>() {
        Ok(code) => code,
        Err(_) => {
            let value = cell.parse::<f64>().ok()?;
            if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
                return None;
            }
            value as u8
        }
    };
    Validity::from_code(code)
}

fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
