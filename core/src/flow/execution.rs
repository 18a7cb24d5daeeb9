// burgerbox/src/flow/execution.rs

//! `Flow::run()`: executes the steps and their handlers in order.

use super::control::{FlowOutcome, StepControl};
use super::definition::Flow;
use super::hooks::Handler;
use super::state::FlowState;
use crate::error::FlowError;
use tracing::{event, info_span, instrument, Instrument, Level};

/// What happened to one step.
enum StepRun {
  Continued,
  Halted,
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `state`.
  ///
  /// Returns `Ok(FlowOutcome::Halted { .. })` when a handler asked to stop, and the
  /// handler's error when one fails. A required step without handlers yields
  /// `FlowError::HandlerMissing`, converted into `Err`.
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(flow = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, state: FlowState<T>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step) in self.steps.iter().enumerate() {
      let step_name = step.name.as_str();

      if let Some(skip_if) = &step.skip_if {
        if skip_if(state.clone()) {
          event!(Level::INFO, step = step_name, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let before = self.before.get(step_name).filter(|v| !v.is_empty());
      let on = self.on.get(step_name).filter(|v| !v.is_empty());
      let after = self.after.get(step_name).filter(|v| !v.is_empty());

      if before.is_none() && on.is_none() && after.is_none() {
        if step.optional {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step = step_name, "Required step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step.name.clone(),
        }));
      }

      let span = info_span!("flow_step", step = step_name, step_index = step_idx, optional = step.optional);
      let phases = [("before", before), ("on", on), ("after", after)];
      let run = async {
        for (phase, handlers) in phases {
          let Some(handlers) = handlers else { continue };
          if let StepRun::Halted = run_handlers(phase, handlers, &state).await? {
            return Ok::<_, Err>(StepRun::Halted);
          }
        }
        Ok(StepRun::Continued)
      };

      match run.instrument(span).await? {
        StepRun::Continued => event!(Level::DEBUG, step = step_name, "Step finished."),
        StepRun::Halted => {
          event!(Level::INFO, step = step_name, "Flow halted by a handler.");
          return Ok(FlowOutcome::Halted { step: step.name.clone() });
        }
      }
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }
}

async fn run_handlers<T, Err>(phase: &str, handlers: &[Handler<T, Err>], state: &FlowState<T>) -> Result<StepRun, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler) in handlers.iter().enumerate() {
    match handler(state.clone()).await {
      Ok(StepControl::Continue) => {}
      Ok(StepControl::Halt) => {
        event!(Level::DEBUG, phase, handler_index = handler_idx, "Handler returned Halt.");
        return Ok(StepRun::Halted);
      }
      Err(e) => {
        event!(Level::ERROR, phase, handler_index = handler_idx, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(StepRun::Continued)
}
