// burgerbox/src/flow/control.rs

//! Signals for controlling flow execution and the outcome of a run.

/// Returned by a handler to say whether the flow should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  /// Run the remaining handlers of this step and the following steps.
  Continue,
  /// Stop right here. No further handlers in this step or later steps run.
  Halt,
}

/// Outcome of a full flow run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
  /// Every non-skipped step ran to completion.
  Completed,
  /// A handler of `step` returned [`StepControl::Halt`].
  Halted { step: String },
}

impl FlowOutcome {
  pub fn is_completed(&self) -> bool {
    matches!(self, FlowOutcome::Completed)
  }
}
