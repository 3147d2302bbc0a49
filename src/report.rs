//! Per-test outcomes and their combination.

use std::fmt;
use std::time::{Duration, SystemTime};

use serde::Serialize;

/// The outcome of one test procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    /// Combines two outcomes, worst outcome wins: `Failed` absorbs
    /// everything, `Skipped` dominates `Passed`, and `Passed` survives only
    /// against `Passed`.
    pub fn and(self, other: Self) -> Self {
        use TestStatus::*;
        match (self, other) {
            (Failed, _) | (_, Failed) => Failed,
            (Skipped, _) | (_, Skipped) => Skipped,
            (Passed, Passed) => Passed,
        }
    }

    /// Folds any number of outcomes into one; an empty sequence counts as
    /// `Passed`.
    pub fn combine(statuses: impl IntoIterator<Item = TestStatus>) -> TestStatus {
        statuses
            .into_iter()
            .fold(TestStatus::Passed, TestStatus::and)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASS",
            TestStatus::Failed => "FAIL",
            TestStatus::Skipped => "SKIP",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One test's outcome: name, status, wall-clock bounds, and the failure
/// message when there is one. Finalized when the procedure's execution
/// ends and immutable from then on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub name: String,
    pub status: TestStatus,
    pub started: SystemTime,
    pub finished: SystemTime,
    pub failure: Option<String>,
}

impl TestReport {
    pub fn duration(&self) -> Duration {
        self.finished
            .duration_since(self.started)
            .unwrap_or_default()
    }
}

/// Sorts reports by test name for deterministic display order.
///
/// The underlying sort is stable, so reports sharing a name keep their
/// relative order and re-sorting is a no-op.
pub fn sort_by_name(reports: &mut [TestReport]) {
    reports.sort_by(|a, b| a.name.cmp(&b.name));
}
