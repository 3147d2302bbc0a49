//! Roster: a minimal-registration test framework.
//!
//! Test procedures are plain functions that take a polymorphic
//! [`Operation`] handle, call [`register!`] once, and then assert. The
//! framework replays each procedure under three operation variants: a
//! gather pass that classifies group members for sequential or parallel
//! execution without running their bodies, a list pass that enumerates
//! registration metadata, and an execution pass that runs assertions for
//! real and turns each outcome into a [`TestReport`].
//!
//! # Example
//!
//! ```
//! use roster::{register, Control, Operation, OperationExt, Registry, TestProcedure, TestStatus};
//!
//! fn arithmetic_holds(op: &mut dyn Operation) -> Control {
//!     register!(op)?;
//!     op.assert_eq(&(2 + 2), &4)
//! }
//!
//! fn strings_compare(op: &mut dyn Operation) -> Control {
//!     register!(op)?;
//!     op.assert("abc" < "abd")
//! }
//!
//! let mut registry = Registry::new();
//! registry.register([arithmetic_holds as TestProcedure, strings_compare]);
//!
//! let reports = registry.run();
//! assert!(reports.iter().all(|r| r.status == TestStatus::Passed));
//! ```
//!
//! Rendering reports, deriving exit codes, and command-line filtering are
//! left to callers; [`report::sort_by_name`] is provided for deterministic
//! display order.

pub use crate::location::SourceLocation;
pub use crate::operation::gather::{Gather, GatheredTest, RegistrationError};
pub use crate::operation::list::List;
pub use crate::operation::test::Test;
pub use crate::operation::{Control, Failure, Interrupt, Operation, OperationExt, Registration};
pub use crate::registry::{Registry, TestGroup, TestProcedure};
pub use crate::report::{sort_by_name, TestReport, TestStatus};

pub mod location;
pub mod operation;
pub mod registry;
pub mod report;
pub mod runner;
