// burgerbox/src/flow/step.rs

use super::FlowState;

/// Predicate evaluated right before a step runs. Returning `true` skips the step.
pub type SkipCondition<T> = std::sync::Arc<dyn Fn(FlowState<T>) -> bool + Send + Sync + 'static>;

/// A named step of a flow.
#[derive(Clone)]
pub struct StepSpec<T: 'static + Send + Sync> {
  pub name: String,
  /// Optional steps with no handlers are skipped instead of failing the run.
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> StepSpec<T> {
  pub fn required(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      optional: false,
      skip_if: None,
    }
  }

  pub fn optional(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      optional: true,
      skip_if: None,
    }
  }

  pub fn skip_if(mut self, condition: impl Fn(FlowState<T>) -> bool + Send + Sync + 'static) -> Self {
    self.skip_if = Some(std::sync::Arc::new(condition));
    self
  }
}

// SkipCondition has no Debug impl, so only report whether one is set.
impl<T: 'static + Send + Sync> std::fmt::Debug for StepSpec<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepSpec")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
