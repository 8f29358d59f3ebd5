//! Maximal-run scanning shared by the stages.

use std::ops::Range;

/// Index ranges of the maximal runs of consecutive items matching `pred`
pub fn runs_where<T>(items: &[T], mut pred: impl FnMut(&T) -> bool) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, item) in items.iter().enumerate() {
        match (pred(item), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }

    // Close a run that reaches the end
    if let Some(s) = start {
        runs.push(s..items.len());
    }

    runs
}
