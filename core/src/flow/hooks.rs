// burgerbox/src/flow/hooks.rs

//! Registration of `before`, `on` and `after` handlers for flow steps.

use super::control::StepControl;
use super::definition::Flow;
use super::state::FlowState;
use crate::error::FlowError;
use std::future::Future;
use std::pin::Pin;

/// A boxed step handler.
///
/// It receives a clone of the flow's shared state and resolves to the control
/// signal for the flow. Handlers must drop any lock guard before awaiting.
pub type Handler<T, Err> = Box<
  dyn Fn(FlowState<T>) -> Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>> + Send + Sync,
>;

#[derive(Clone, Copy)]
enum Phase {
  Before,
  On,
  After,
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn register<F, HandlerErr>(
    &mut self,
    phase: Phase,
    step_name: &str,
    handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let boxed: Handler<T, Err> = Box::new(move |state| {
      let fut = handler_fn(state);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    let table = match phase {
      Phase::Before => &mut self.before,
      Phase::On => &mut self.on,
      Phase::After => &mut self.after,
    };
    table.entry(step_name.to_string()).or_default().push(boxed);
  }

  /// Registers a handler that runs before the step's `on` handlers.
  ///
  /// The handler's error type only needs to convert into the flow's `Err`.
  pub fn before<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::Before, step_name, handler_fn);
  }

  /// Registers the main handler of a step. Several may be registered; they run in
  /// registration order.
  pub fn on<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::On, step_name, handler_fn);
  }

  pub fn after<F, HandlerErr>(&mut self, step_name: &str, handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::After, step_name, handler_fn);
  }
}
