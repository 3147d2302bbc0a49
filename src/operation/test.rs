//! The execution variant: the one pass that actually runs test bodies.

use crate::operation::{Control, Failure, Interrupt, Operation, Registration};

/// Execution state for a single procedure invocation.
///
/// One fresh instance per execution, exclusively owned by it. The only
/// state is the name under which the procedure registered, set once and
/// left untouched for the rest of the invocation.
#[derive(Debug, Default)]
pub struct Test {
    name: Option<String>,
}

impl Test {
    pub fn new() -> Self {
        Self::default()
    }

    /// The name the current procedure registered under, once it has.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Operation for Test {
    /// Stores the name and lets the body continue, unless the registration
    /// is disabled, in which case the invocation ends right here and
    /// nothing after the `register!` call runs.
    fn register(&mut self, registration: Registration) -> Control {
        let disabled = registration.disabled;
        self.name = Some(registration.name);
        if disabled {
            return Err(Interrupt::Disabled);
        }
        Ok(())
    }

    fn report_failure(&mut self, failure: Failure) -> Control {
        Err(Interrupt::Failed(failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn passes(op: &mut dyn Operation) -> Control {
        register!(op)?;
        op.assert(2 + 2 == 4)
    }

    fn fails(op: &mut dyn Operation) -> Control {
        register!(op)?;
        op.assert(false)
    }

    static DISABLED_BODY_RUNS: AtomicUsize = AtomicUsize::new(0);

    fn disabled(op: &mut dyn Operation) -> Control {
        register!(op, Registration::new("disabled").disabled())?;
        DISABLED_BODY_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[test]
    fn register_stores_the_name_and_continues() {
        let mut test = Test::new();
        assert!(passes(&mut test).is_ok());
        assert!(test.name().unwrap().ends_with("passes"));
    }

    #[test]
    fn a_failed_assertion_unwinds_the_procedure() {
        let mut test = Test::new();
        match fails(&mut test) {
            Err(Interrupt::Failed(failure)) => {
                assert!(failure.message.contains("assertion failed"));
            }
            other => panic!("expected a failure interrupt, got {other:?}"),
        }
    }

    #[test]
    fn a_disabled_registration_stops_the_body() {
        let mut test = Test::new();
        assert_eq!(disabled(&mut test), Err(Interrupt::Disabled));
        assert_eq!(DISABLED_BODY_RUNS.load(Ordering::SeqCst), 0);
        assert_eq!(test.name(), Some("disabled"));
    }
}
