//! Sample builders for unit tests.

use gaze_core::{EyeChannel, Recording, Sample};

/// Left-eye-only samples; `None` marks a missing sample
pub fn left_samples(points: &[Option<(f64, f64)>]) -> Vec<Sample> {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let left = match point {
                Some((x, y)) => EyeChannel::valid(*x, *y),
                None => EyeChannel::missing(),
            };
            Sample::new(i.to_string(), left, EyeChannel::missing())
        })
        .collect()
}

pub fn left_recording(points: &[Option<(f64, f64)>]) -> Recording {
    Recording::new("test", left_samples(points))
}

/// `n` copies of the same valid point
pub fn still(x: f64, y: f64, n: usize) -> Vec<Option<(f64, f64)>> {
    vec![Some((x, y)); n]
}

pub fn gap(n: usize) -> Vec<Option<(f64, f64)>> {
    vec![None; n]
}
