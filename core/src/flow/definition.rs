// burgerbox/src/flow/definition.rs

//! The `Flow<T, Err>` struct and the methods that build and reshape it.

use super::hooks::Handler;
use super::step::{SkipCondition, StepSpec};
use crate::error::FlowError;
use std::collections::HashMap;

/// An ordered list of named steps run against a shared [`FlowState<T>`](super::FlowState).
///
/// `Err` is the error type handlers return. It must be `From<FlowError>` so that
/// engine-level failures (a required step without handlers) come back through the
/// same channel.
pub struct Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Used in log spans only.
  pub(crate) name: String,
  pub(crate) steps: Vec<StepSpec<T>>,

  pub(crate) before: HashMap<String, Vec<Handler<T, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<T, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<T, Err>>>,
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new(name: impl Into<String>, steps: impl IntoIterator<Item = StepSpec<T>>) -> Self {
    Self {
      name: name.into(),
      steps: steps.into_iter().collect(),
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  /// Shorthand for a flow whose steps are all required and unconditional.
  pub fn with_steps(name: impl Into<String>, step_names: &[&str]) -> Self {
    Self::new(name, step_names.iter().map(|s| StepSpec::required(*s)))
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn position(&self, step_name: &str) -> Option<usize> {
    self.steps.iter().position(|s| s.name == step_name)
  }

  /// Panics if the step is unknown. A typo in a step name is a setup bug, not a
  /// runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> usize {
    match self.position(step_name) {
      Some(idx) => idx,
      None => panic!("Flow '{}' setup error: step '{}' not found.", self.name, step_name),
    }
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.position(step_name).is_some() {
      panic!("Flow '{}' setup error: step '{}' already exists.", self.name, step_name);
    }
  }

  pub fn insert_before_step(&mut self, existing_step_name: &str, step: StepSpec<T>) {
    let idx = self.ensure_step_exists(existing_step_name);
    self.ensure_step_not_exists(&step.name);
    self.steps.insert(idx, step);
  }

  pub fn insert_after_step(&mut self, existing_step_name: &str, step: StepSpec<T>) {
    let idx = self.ensure_step_exists(existing_step_name);
    self.ensure_step_not_exists(&step.name);
    self.steps.insert(idx + 1, step);
  }

  /// Removes a step together with its handlers. Unknown names are a no-op.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Some(idx) = self.position(step_name) {
      self.steps.remove(idx);
      self.before.remove(step_name);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    let idx = self.ensure_step_exists(step_name);
    self.steps[idx].optional = optional;
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<T>>) {
    let idx = self.ensure_step_exists(step_name);
    self.steps[idx].skip_if = skip_if;
  }
}
