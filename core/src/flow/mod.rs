// burgerbox/src/flow/mod.rs

//! A small async step-workflow engine.
//!
//! A [`Flow`] is an ordered list of named steps run against shared state. Each
//! step can have `before`, `on` and `after` handlers, an `optional` flag and a
//! `skip_if` predicate. Handlers return [`StepControl::Halt`] to stop the flow
//! early. The storefront uses flows for checkout and the account workflows.

pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod state;
pub mod step;

pub use control::{FlowOutcome, StepControl};
pub use definition::Flow;
pub use hooks::Handler;
pub use state::FlowState;
pub use step::{SkipCondition, StepSpec};
