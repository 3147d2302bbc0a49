//! The gather variant: classifies a group's procedures without running
//! their bodies.
//!
//! The runner makes one single-threaded gather pass per group. Each
//! procedure is invoked with the gatherer as its operation; `register`
//! records the registration and ends the invocation with
//! [`Interrupt::Registered`], so nothing after the registration executes.
//! After each invocation the gatherer counts how many registrations it
//! observed: exactly one is the contract, zero and two-plus are
//! registration errors surfaced as failed reports.

use thiserror::Error;

use crate::operation::{Control, Failure, Interrupt, Operation, Registration};
use crate::registry::TestProcedure;

/// A procedure paired with the registration it announced during the
/// gather pass.
#[derive(Debug, Clone)]
pub struct GatheredTest {
    pub procedure: TestProcedure,
    pub registration: Registration,
}

/// A procedure broke the register-exactly-once contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("procedure never called register during the gather pass")]
    Unregistered,
    #[error("register called {count} times in one invocation")]
    MultiplyRegistered { name: String, count: usize },
}

/// Classification state for one group's gather pass.
///
/// Exclusively owned by that pass and discarded once its buckets are
/// consumed; every run re-derives the classification fresh.
#[derive(Debug, Default)]
pub struct Gather {
    observed: Vec<Registration>,
    sequential: Vec<GatheredTest>,
    parallel: Vec<GatheredTest>,
}

impl Gather {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes `procedure` under this gatherer and files it into the
    /// sequential or parallel bucket based on the one registration it is
    /// expected to make. Registration counting decides the outcome; the
    /// invocation's own return value carries no information here.
    pub fn observe(&mut self, procedure: TestProcedure) -> Result<(), RegistrationError> {
        let _ = procedure(self);
        let mut observed = std::mem::take(&mut self.observed);
        match observed.len() {
            0 => Err(RegistrationError::Unregistered),
            1 => {
                let registration = observed.remove(0);
                let bucket = if registration.parallelize {
                    &mut self.parallel
                } else {
                    &mut self.sequential
                };
                bucket.push(GatheredTest {
                    procedure,
                    registration,
                });
                Ok(())
            }
            count => Err(RegistrationError::MultiplyRegistered {
                name: observed.swap_remove(0).name,
                count,
            }),
        }
    }

    /// Consumes the gatherer, yielding `(sequential, parallel)` buckets in
    /// declaration order.
    pub fn into_buckets(self) -> (Vec<GatheredTest>, Vec<GatheredTest>) {
        (self.sequential, self.parallel)
    }
}

impl Operation for Gather {
    fn register(&mut self, registration: Registration) -> Control {
        self.observed.push(registration);
        Err(Interrupt::Registered)
    }

    // Assertions are meaningless while bodies are being classified.
    fn report_failure(&mut self, _failure: Failure) -> Control {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BODY_RUNS: AtomicUsize = AtomicUsize::new(0);

    fn well_behaved(op: &mut dyn Operation) -> Control {
        register!(op)?;
        BODY_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn wants_sequential(op: &mut dyn Operation) -> Control {
        register!(op, Registration::new("wants_sequential").sequential())?;
        Ok(())
    }

    fn forgets_to_register(_op: &mut dyn Operation) -> Control {
        Ok(())
    }

    fn registers_twice(op: &mut dyn Operation) -> Control {
        let _ = register!(op, Registration::new("registers_twice"));
        let _ = register!(op, Registration::new("registers_twice"));
        Ok(())
    }

    #[test]
    fn classifies_into_buckets_without_running_bodies() {
        let before = BODY_RUNS.load(Ordering::SeqCst);
        let mut gather = Gather::new();
        gather.observe(well_behaved).unwrap();
        gather.observe(wants_sequential).unwrap();
        assert_eq!(BODY_RUNS.load(Ordering::SeqCst), before);

        let (sequential, parallel) = gather.into_buckets();
        assert_eq!(sequential.len(), 1);
        assert_eq!(parallel.len(), 1);
        assert_eq!(sequential[0].registration.name, "wants_sequential");
        assert!(parallel[0].registration.name.ends_with("well_behaved"));
    }

    #[test]
    fn missing_registration_is_an_error() {
        let mut gather = Gather::new();
        assert_eq!(
            gather.observe(forgets_to_register),
            Err(RegistrationError::Unregistered)
        );
    }

    #[test]
    fn double_registration_is_an_error() {
        let mut gather = Gather::new();
        let err = gather.observe(registers_twice).unwrap_err();
        assert_eq!(
            err,
            RegistrationError::MultiplyRegistered {
                name: "registers_twice".to_string(),
                count: 2,
            }
        );
    }

    #[test]
    fn a_bad_procedure_does_not_poison_the_next_one() {
        let mut gather = Gather::new();
        let _ = gather.observe(registers_twice);
        gather.observe(wants_sequential).unwrap();
        let (sequential, _) = gather.into_buckets();
        assert_eq!(sequential.len(), 1);
    }
}
