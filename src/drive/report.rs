//! Summary of a single drive run.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a drive run delivered and how it ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriveReport {
    /// Unique identifier of the run, also recorded on its tracing span
    pub run_id: Uuid,

    /// Number of batches delivered
    pub batches_fed: usize,

    /// Number of elements delivered across all batches
    pub elements_fed: usize,

    /// Whether the consumer reached `Done`
    pub finished: bool,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run stopped delivering input
    pub finished_at: DateTime<Utc>,
}

impl DriveReport {
    pub(crate) fn start() -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            batches_fed: 0,
            elements_fed: 0,
            finished: false,
            started_at: now,
            finished_at: now,
        }
    }

    pub(crate) fn record_batch(&mut self, size: usize) {
        self.batches_fed += 1;
        self.elements_fed += size;
    }

    pub(crate) fn complete(mut self, finished: bool) -> Self {
        self.finished = finished;
        self.finished_at = Utc::now();
        self
    }

    /// Wall-clock time between start and stop.
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}
