//! The list variant: enumerates registration metadata without executing
//! test bodies.
//!
//! Listing is intentionally forgiving: a procedure that never registers
//! simply contributes no entry. Enforcing the register-exactly-once
//! contract is the runner's job.

use crate::operation::{Control, Failure, Interrupt, Operation, Registration};
use crate::registry::TestProcedure;

/// Accumulates the registrations a set of procedures announce.
#[derive(Debug, Default)]
pub struct List {
    entries: Vec<Registration>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes `procedure` under this lister; its registration, if any, is
    /// appended to the entries.
    pub fn observe(&mut self, procedure: TestProcedure) {
        let _ = procedure(self);
    }

    pub fn entries(&self) -> &[Registration] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Registration> {
        self.entries
    }
}

impl Operation for List {
    fn register(&mut self, registration: Registration) -> Control {
        self.entries.push(registration);
        Err(Interrupt::Registered)
    }

    fn report_failure(&mut self, _failure: Failure) -> Control {
        Ok(())
    }
}
