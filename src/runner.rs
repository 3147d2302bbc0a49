//! Orchestrates a run: gather, execute, report.
//!
//! For each group, in registry order: a single-threaded gather pass
//! classifies members into the sequential and parallel buckets; the
//! sequential bucket then executes in declaration order on the calling
//! thread while the parallel bucket fans out over rayon's worker pool
//! (sized to available hardware concurrency). Every per-procedure outcome
//! — including registration-contract violations discovered during the
//! gather pass — becomes exactly one report, so the run always returns a
//! complete collection and nothing escapes it.
//!
//! There is no cancellation and no timeout: once a procedure starts under
//! the execution variant it runs to its own completion or failure.

use std::time::SystemTime;

use rayon::prelude::*;

use crate::operation::gather::{Gather, GatheredTest, RegistrationError};
use crate::operation::test::Test;
use crate::operation::Interrupt;
use crate::registry::{Registry, TestGroup};
use crate::report::{TestReport, TestStatus};

/// Runs every group in `registry` and collects one report per procedure.
///
/// The collection is unsorted; callers wanting deterministic display order
/// apply [`sort_by_name`](crate::report::sort_by_name).
pub fn run(registry: &Registry) -> Vec<TestReport> {
    registry
        .groups()
        .iter()
        .enumerate()
        .flat_map(|(index, group)| run_group(index, group))
        .collect()
}

fn run_group(group_index: usize, group: &TestGroup) -> Vec<TestReport> {
    let mut reports = Vec::with_capacity(group.len());

    // Gather pass: strictly sequential, it owns the classification state.
    let mut gather = Gather::new();
    for (slot, procedure) in group.procedures().iter().enumerate() {
        if let Err(error) = gather.observe(*procedure) {
            reports.push(registration_failure(group_index, slot, error));
        }
    }
    let (sequential, parallel) = gather.into_buckets();

    reports.extend(sequential.into_iter().map(execute));
    reports.par_extend(parallel.into_par_iter().map(execute));
    reports
}

/// A procedure that broke the register-exactly-once contract still gets a
/// report; the run carries on with the rest of the group.
fn registration_failure(
    group_index: usize,
    slot: usize,
    error: RegistrationError,
) -> TestReport {
    let name = match &error {
        // No registration was observed, so there is no name to report under.
        RegistrationError::Unregistered => {
            format!("group {} procedure {}", group_index + 1, slot + 1)
        }
        RegistrationError::MultiplyRegistered { name, .. } => name.clone(),
    };
    let now = SystemTime::now();
    TestReport {
        name,
        status: TestStatus::Failed,
        started: now,
        finished: now,
        failure: Some(error.to_string()),
    }
}

fn execute(test: GatheredTest) -> TestReport {
    let mut op = Test::new();
    let started = SystemTime::now();
    let outcome = (test.procedure)(&mut op);
    let finished = SystemTime::now();

    let (status, failure) = match outcome {
        Ok(()) => (TestStatus::Passed, None),
        Err(Interrupt::Disabled) => (TestStatus::Skipped, None),
        Err(Interrupt::Failed(failure)) => (TestStatus::Failed, Some(failure.to_string())),
        // Only the gather and list variants raise this; a procedure that
        // forwards it manually is misusing the control flow.
        Err(Interrupt::Registered) => (
            TestStatus::Failed,
            Some("registration interrupt escaped into execution".to_string()),
        ),
    };

    TestReport {
        name: test.registration.name,
        status,
        started,
        finished,
        failure,
    }
}
