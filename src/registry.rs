//! Test procedures, groups, and the registry that collects them.
//!
//! The registry is an explicit owned object rather than ambient global
//! state: build one at program start, append groups to it during setup,
//! and hand it to `run` once registration is complete. Groups are
//! append-only and never mutated by a run, so a second `run` re-processes
//! the same accumulated groups.

use crate::operation::list::List;
use crate::operation::{Control, Operation, Registration};
use crate::report::TestReport;
use crate::runner;

/// A test procedure: a plain function taking the operation it is being
/// replayed under. Identity is fn-pointer identity.
pub type TestProcedure = fn(&mut dyn Operation) -> Control;

/// A fixed ordered sequence of procedures scheduled as one unit.
///
/// Members are candidates for parallel execution unless their registration
/// opts them out with [`Registration::sequential`].
#[derive(Debug, Clone, Default)]
pub struct TestGroup {
    procedures: Vec<TestProcedure>,
}

impl TestGroup {
    pub fn new(procedures: Vec<TestProcedure>) -> Self {
        Self { procedures }
    }

    pub fn procedures(&self) -> &[TestProcedure] {
        &self.procedures
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

impl From<Vec<TestProcedure>> for TestGroup {
    fn from(procedures: Vec<TestProcedure>) -> Self {
        Self::new(procedures)
    }
}

impl<const N: usize> From<[TestProcedure; N]> for TestGroup {
    fn from(procedures: [TestProcedure; N]) -> Self {
        Self::new(procedures.to_vec())
    }
}

/// The ordered collection of registered groups.
#[derive(Debug, Default)]
pub struct Registry {
    groups: Vec<TestGroup>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one group. No validation happens here; whether each member
    /// actually registers is only checkable once procedures are invoked,
    /// so it is deferred to [`run`](Self::run).
    pub fn register(&mut self, group: impl Into<TestGroup>) {
        self.groups.push(group.into());
    }

    pub fn groups(&self) -> &[TestGroup] {
        &self.groups
    }

    /// Enumerates every member's registration metadata, in registry order,
    /// without executing any test body.
    pub fn list(&self) -> Vec<Registration> {
        let mut list = List::new();
        for group in &self.groups {
            for procedure in group.procedures() {
                list.observe(*procedure);
            }
        }
        list.into_entries()
    }

    /// Runs every registered group and returns one report per procedure.
    /// Re-running re-gathers, re-executes, and re-times everything.
    pub fn run(&self) -> Vec<TestReport> {
        runner::run(self)
    }
}
