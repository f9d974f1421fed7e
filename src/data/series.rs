//! Ordered sample history for the chart.

use std::collections::VecDeque;

use serde::Serialize;

use super::measurement::Measurement;

/// Default maximum number of samples to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 10_000;

/// Append-only sequence of measurements, in production order.
///
/// When a limit is set the oldest samples are evicted first. The number of
/// evicted samples is remembered so every sample keeps a stable absolute
/// index (its cycle number) for the x-axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    samples: VecDeque<Measurement>,
    /// Maximum retained samples, `None` for unbounded.
    #[serde(skip)]
    limit: Option<usize>,
    /// Samples dropped from the front so far.
    evicted: u64,
    execution_failures: u64,
    parse_failures: u64,
}

impl Series {
    /// Create an unbounded series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a series that keeps at most `limit` samples (`0` means unbounded).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: (limit > 0).then_some(limit),
            ..Self::default()
        }
    }

    /// Append a measurement, evicting the oldest sample if over the limit.
    pub fn push(&mut self, measurement: Measurement) {
        match measurement {
            Measurement::ExecutionFailure => self.execution_failures += 1,
            Measurement::ParseFailure => self.parse_failures += 1,
            Measurement::Value(_) => {}
        }

        self.samples.push_back(measurement);
        if let Some(limit) = self.limit {
            while self.samples.len() > limit {
                self.samples.pop_front();
                self.evicted += 1;
            }
        }
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total samples ever appended, including evicted ones.
    pub fn total(&self) -> u64 {
        self.evicted + self.samples.len() as u64
    }

    /// Absolute index of the first retained sample.
    pub fn first_index(&self) -> u64 {
        self.evicted
    }

    pub fn latest(&self) -> Option<Measurement> {
        self.samples.back().copied()
    }

    /// Failures ever appended, as (execution, parse).
    pub fn failure_counts(&self) -> (u64, u64) {
        (self.execution_failures, self.parse_failures)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.samples.iter()
    }

    /// The most recent `width` samples paired with their absolute index.
    pub fn window(&self, width: usize) -> impl Iterator<Item = (u64, Measurement)> + '_ {
        let skip = self.samples.len().saturating_sub(width);
        let start = self.evicted + skip as u64;
        self.samples
            .iter()
            .skip(skip)
            .enumerate()
            .map(move |(i, m)| (start + i as u64, *m))
    }

    /// Copy the retained samples out, oldest first.
    pub fn to_vec(&self) -> Vec<Measurement> {
        self.samples.iter().copied().collect()
    }
}
