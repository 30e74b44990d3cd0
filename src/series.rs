//! Minute-series normalization and downsampling.
//!
//! The statistics server reports occurrence counts per minute of day as a
//! pair of label and count arrays. This module reconciles the two arrays
//! into an index-aligned [`Series`] and reduces long series to a bounded
//! number of rendered buckets by summing contiguous runs.

use serde::Deserialize;

/// A label entry as it appears on the wire: either a pre-formatted time
/// string or an integer minute-of-day value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Minute(u32),
    Text(String),
}

/// An ordered, index-aligned label/count series.
///
/// Invariant: `labels.len() == counts.len()` for every `Series` produced
/// by [`normalize`] or [`downsample`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Format a minute-of-day index as a zero-padded `HH:MM` label, wrapping
/// modulo one day.
pub fn minutes_to_label(minute: usize) -> String {
    let m = minute % (24 * 60);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Reconcile possibly-mismatched label and count arrays into an
/// equal-length [`Series`].
///
/// Numeric labels are converted to `HH:MM` strings. If the arrays differ
/// in length, the shorter one is padded up to the longer: missing labels
/// are synthesized from their minute index, missing counts default to 0.
pub fn normalize(labels: Vec<RawLabel>, counts: Vec<u64>) -> Series {
    let n = labels.len().max(counts.len());

    let mut labels = labels.into_iter();
    let mut out_labels = Vec::with_capacity(n);
    for i in 0..n {
        out_labels.push(match labels.next() {
            Some(RawLabel::Minute(m)) => minutes_to_label(m as usize),
            Some(RawLabel::Text(text)) => text,
            None => minutes_to_label(i),
        });
    }

    let mut out_counts = counts;
    out_counts.resize(n, 0);

    Series {
        labels: out_labels,
        counts: out_counts,
    }
}

/// Reduce a series to at most `max_points` buckets by summing contiguous
/// runs of counts.
///
/// Series no longer than `max_points` pass through unchanged. Otherwise
/// the run length is `ceil(n / max_points)` and each output bucket carries
/// the label of the run's last element, synthesized from the minute index
/// if no label exists at that position.
pub fn downsample(series: Series, max_points: usize) -> Series {
    let n = series.counts.len();
    if n <= max_points {
        return series;
    }

    // max_points == 0 collapses to a single bucket rather than dividing by zero
    let factor = n.div_ceil(max_points.max(1));
    let buckets = n.div_ceil(factor);

    let mut labels = Vec::with_capacity(buckets);
    let mut counts = Vec::with_capacity(buckets);

    let mut start = 0;
    while start < n {
        let end = (start + factor).min(n);
        counts.push(series.counts[start..end].iter().sum());

        let last_idx = end - 1;
        labels.push(
            series
                .labels
                .get(last_idx)
                .cloned()
                .unwrap_or_else(|| minutes_to_label(last_idx)),
        );

        start = end;
    }

    Series { labels, counts }
}

/// Full client-side pipeline for a fetched payload: normalize the label
/// and count arrays, then downsample to the render budget.
pub fn prepare(labels: Vec<RawLabel>, counts: Vec<u64>, max_points: usize) -> Series {
    downsample(normalize(labels, counts), max_points)
}
