//! The polymorphic operation core.
//!
//! A test procedure is written once against `&mut dyn Operation` and is
//! replayed under different operation variants: [`Gather`](gather::Gather)
//! classifies procedures without running their bodies, [`List`](list::List)
//! enumerates registration metadata, and [`Test`](test::Test) executes for
//! real. The procedure body never branches on which variant it received —
//! it calls [`register!`](crate::register) first, then asserts; everything
//! variant-specific lives behind the dispatch.
//!
//! # Control flow
//!
//! There are no panics and no unwinding here. Early exits between passes
//! are ordinary `Err` values of type [`Interrupt`], propagated out of the
//! procedure with `?`:
//!
//! - [`Interrupt::Registered`] ends a procedure invocation during the
//!   gather and list passes, so code after `register!` never runs there.
//! - [`Interrupt::Disabled`] ends a disabled procedure immediately after
//!   registration during execution; the runner maps it to a skip.
//! - [`Interrupt::Failed`] carries an assertion failure out of the
//!   procedure; the runner maps it to a failed report.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::location::SourceLocation;

pub mod gather;
pub mod list;
pub mod test;

// =============================================================================
// CONTROL VALUES
// =============================================================================

/// Return type of test procedures, `register`, and every assertion helper.
pub type Control = Result<(), Interrupt>;

/// Why a procedure invocation ended before its body completed.
///
/// `Registered` is internal plumbing consumed by the gather and list
/// passes; `Disabled` and `Failed` are caught per-procedure by the runner
/// and become `Skipped` and `Failed` report statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Interrupt {
    #[error("registration observed; body not executed on this pass")]
    Registered,
    #[error("test is disabled")]
    Disabled,
    #[error(transparent)]
    Failed(#[from] Failure),
}

/// One assertion failure: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{location}: {message}")]
pub struct Failure {
    pub message: String,
    pub location: SourceLocation,
}

impl Failure {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

// =============================================================================
// REGISTRATION METADATA
// =============================================================================

/// Metadata a procedure announces about itself when it registers.
///
/// `disabled` defaults to false and `parallelize` to true, so the common
/// case is `register!(op)?` with no explicit registration at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub disabled: bool,
    pub parallelize: bool,
}

impl Registration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
            parallelize: true,
        }
    }

    /// Marks the test disabled; it will be reported as skipped and its body
    /// will not run.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Opts the test out of the parallel bucket; it will run in declaration
    /// order on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallelize = false;
        self
    }
}

/// Recovers the enclosing function's path from a probe embedded by
/// [`register!`](crate::register). Closure frames between the probe and the
/// named function are stripped.
#[doc(hidden)]
pub fn enclosing_function(probe: &'static str) -> &'static str {
    let mut name = probe.strip_suffix("::__name_probe").unwrap_or(probe);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// Registers the enclosing function as a test under the current operation.
///
/// With one argument the test's name is the enclosing function's own path,
/// captured at the call site; with two, the caller supplies an explicit
/// [`Registration`]:
///
/// ```
/// use roster::{register, Control, Operation, Registration};
///
/// fn checks_nothing(op: &mut dyn Operation) -> Control {
///     register!(op)?;
///     op.assert(true)
/// }
///
/// fn runs_alone(op: &mut dyn Operation) -> Control {
///     register!(op, Registration::new("runs_alone").sequential())?;
///     Ok(())
/// }
/// ```
///
/// Must be the first statement of a test procedure: anything before it runs
/// on every pass, including the passes that only want registration
/// metadata.
#[macro_export]
macro_rules! register {
    ($op:expr) => {{
        fn __name_probe() {}
        let name = $crate::operation::enclosing_function(::std::any::type_name_of_val(
            &__name_probe,
        ));
        $op.register($crate::operation::Registration::new(name))
    }};
    ($op:expr, $registration:expr) => {
        $op.register($registration)
    };
}

// =============================================================================
// THE OPERATION TRAIT
// =============================================================================

/// One behavioral mode a test procedure can be invoked under.
///
/// Exactly two primitives are variant-specific: [`register`](Self::register)
/// and [`report_failure`](Self::report_failure). All assertion helpers are
/// provided once on top of `report_failure`, whose effect differs per
/// variant (execution raises [`Interrupt::Failed`]; the metadata passes
/// ignore it) but whose signature does not.
pub trait Operation {
    /// Records the calling procedure under `registration`.
    ///
    /// The gather and list variants return [`Interrupt::Registered`] so the
    /// body is not executed; the execution variant returns `Ok(())` and
    /// lets the body continue, unless the registration is disabled.
    fn register(&mut self, registration: Registration) -> Control;

    /// Reports one failure. The execution variant turns this into an
    /// [`Interrupt::Failed`] that unwinds the current procedure; the
    /// metadata variants ignore it.
    fn report_failure(&mut self, failure: Failure) -> Control;

    /// Fails the current test unless `condition` holds. The failure message
    /// carries the caller's file and line.
    #[track_caller]
    fn assert(&mut self, condition: bool) -> Control {
        if condition {
            Ok(())
        } else {
            self.report_failure(Failure::new("assertion failed", SourceLocation::here()))
        }
    }

    /// Fails the current test unconditionally with `message`.
    #[track_caller]
    fn fail(&mut self, message: &str) -> Control {
        self.report_failure(Failure::new(message, SourceLocation::here()))
    }
}

/// Generic assertions over any [`Operation`], including `dyn Operation`.
///
/// These live in an extension trait because they are generic over the
/// compared type and would otherwise make `Operation` unusable as a trait
/// object.
pub trait OperationExt: Operation {
    /// Ordering/equality assertion parameterized by a comparison operator
    /// and an infix description used in the failure message ("=", "<", ...).
    #[track_caller]
    fn assert_cmp<T>(
        &mut self,
        left: &T,
        right: &T,
        cmp: impl Fn(&T, &T) -> bool,
        infix: &str,
        render: impl Fn(&T) -> String,
    ) -> Control {
        if cmp(left, right) {
            Ok(())
        } else {
            self.report_failure(Failure::new(
                format!("expected {} {} {}", render(left), infix, render(right)),
                SourceLocation::here(),
            ))
        }
    }

    /// Equality assertion parameterized by an equality function and a
    /// renderer for the compared type.
    #[track_caller]
    fn assert_eq_by<T>(
        &mut self,
        actual: &T,
        expected: &T,
        eq: impl Fn(&T, &T) -> bool,
        render: impl Fn(&T) -> String,
    ) -> Control {
        self.assert_cmp(actual, expected, eq, "=", render)
    }

    /// Equality assertion for types that are `PartialEq` and `Debug`.
    #[track_caller]
    fn assert_eq<T: PartialEq + fmt::Debug>(&mut self, actual: &T, expected: &T) -> Control {
        self.assert_cmp(actual, expected, |a, b| a == b, "=", |v| format!("{v:?}"))
    }
}

impl<O: Operation + ?Sized> OperationExt for O {}
