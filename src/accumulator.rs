use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::errors::GatherError;

/// Tag set of a metric record.
pub type Tags = BTreeMap<String, String>;

/// Field set of a metric record. Everything Burrow reports is integral.
pub type Fields = BTreeMap<String, i64>;

/// Destination of everything the engine produces during one gather round.
///
/// Implementations must tolerate concurrent callers: records are handed
/// over from many worker tasks at once, errors from the final drain.
pub trait Accumulator: Send + Sync {
    /// Record one metric.
    fn add_fields(&self, measurement: &str, fields: Fields, tags: Tags);

    /// Record one error.
    ///
    /// An error never implies the round was aborted: sibling branches keep
    /// producing metrics.
    fn add_error(&self, error: GatherError);
}

/// A single flat metric record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub measurement: String,
    pub tags: Tags,
    pub fields: Fields,
    pub at: DateTime<Utc>,
}

/// [`Accumulator`] that keeps everything in memory.
///
/// Useful for hosts that post-process a whole poll at once, and as the
/// capture target in tests.
#[derive(Debug, Default)]
pub struct RecordingAccumulator {
    metrics: Mutex<Vec<Metric>>,
    errors: Mutex<Vec<GatherError>>,
}

impl RecordingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the records accumulated so far.
    pub fn metrics(&self) -> Vec<Metric> {
        self.metrics.lock().expect("metrics lock poisoned").clone()
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().expect("errors lock poisoned").len()
    }

    /// Drain the recorded metrics, leaving the accumulator empty.
    pub fn take_metrics(&self) -> Vec<Metric> {
        std::mem::take(&mut *self.metrics.lock().expect("metrics lock poisoned"))
    }

    /// Drain the recorded errors, leaving the accumulator empty.
    pub fn take_errors(&self) -> Vec<GatherError> {
        std::mem::take(&mut *self.errors.lock().expect("errors lock poisoned"))
    }
}

impl Accumulator for RecordingAccumulator {
    fn add_fields(&self, measurement: &str, fields: Fields, tags: Tags) {
        self.metrics.lock().expect("metrics lock poisoned").push(Metric {
            measurement: measurement.to_string(),
            tags,
            fields,
            at: Utc::now(),
        });
    }

    fn add_error(&self, error: GatherError) {
        self.errors.lock().expect("errors lock poisoned").push(error);
    }
}
