// burgerbox_storefront/src/workflows/account_flows.rs

//! Sign-up, sign-in, sign-out and password recovery.
//!
//! Register and login run as flows (`validate_form`, `submit`, `persist_session`)
//! so the session write happens only after the API accepted the credentials.

use crate::errors::{AppError, Result};
use crate::forms::{validate_forgot_password, LoginForm, RegisterForm, ResetPasswordForm};
use crate::models::{LoginRequest, RegisterRequest, UserSession};
use crate::state::AppState;
use crate::workflows::contexts::{LoginCtxData, RegisterCtxData};
use burgerbox::{Flow, FlowOutcome, FlowState, Notice, StepControl};
use tracing::{info, instrument, warn};

const ACCOUNT_STEPS: [&str; 3] = ["validate_form", "submit", "persist_session"];

/// Stores a freshly issued session and greets the user.
fn store_session(app_state: &AppState, session: &UserSession, greeting: &str) -> Result<()> {
  app_state.session_store.save(session)?;
  *app_state.session.write() = Some(session.clone());
  app_state.notices.push(Notice::success(greeting));
  info!(user = %session.id, is_admin = session.is_admin, "Session stored.");
  Ok(())
}

pub fn build_register_flow() -> Flow<RegisterCtxData, AppError> {
  let mut p = Flow::<RegisterCtxData, AppError>::with_steps("register", &ACCOUNT_STEPS);

  p.on("validate_form", |ctx: FlowState<RegisterCtxData>| async move {
    let errors = ctx.read().form.validate();
    errors.into_result()?;
    Ok::<_, AppError>(StepControl::Continue)
  });

  p.on("submit", |ctx: FlowState<RegisterCtxData>| async move {
    let (api, request) = {
      let guard = ctx.read();
      let request = RegisterRequest {
        name: guard.form.name.trim().to_string(),
        email: guard.form.email.trim().to_string(),
        password: guard.form.password.clone(),
      };
      (guard.app_state.api.clone(), request)
    };
    let session = api.register(&request).await?;
    ctx.write().session = Some(session);
    Ok::<_, AppError>(StepControl::Continue)
  });

  p.on("persist_session", |ctx: FlowState<RegisterCtxData>| async move {
    let (app_state, session) = {
      let guard = ctx.read();
      (guard.app_state.clone(), guard.session.clone())
    };
    let session = session.ok_or_else(|| AppError::Internal("registration returned no session".to_string()))?;
    store_session(&app_state, &session, "User Registered!")?;
    Ok::<_, AppError>(StepControl::Continue)
  });

  p
}

pub fn build_login_flow() -> Flow<LoginCtxData, AppError> {
  let mut p = Flow::<LoginCtxData, AppError>::with_steps("login", &ACCOUNT_STEPS);

  p.on("validate_form", |ctx: FlowState<LoginCtxData>| async move {
    let errors = ctx.read().form.validate();
    errors.into_result()?;
    Ok::<_, AppError>(StepControl::Continue)
  });

  p.on("submit", |ctx: FlowState<LoginCtxData>| async move {
    let (api, request) = {
      let guard = ctx.read();
      let request = LoginRequest {
        email: guard.form.email.trim().to_string(),
        password: guard.form.password.clone(),
      };
      (guard.app_state.api.clone(), request)
    };
    let session = api.login(&request).await?;
    ctx.write().session = Some(session);
    Ok::<_, AppError>(StepControl::Continue)
  });

  p.on("persist_session", |ctx: FlowState<LoginCtxData>| async move {
    let (app_state, session) = {
      let guard = ctx.read();
      (guard.app_state.clone(), guard.session.clone())
    };
    let session = session.ok_or_else(|| AppError::Internal("login returned no session".to_string()))?;
    store_session(&app_state, &session, "Logged In!")?;
    Ok::<_, AppError>(StepControl::Continue)
  });

  p
}

fn finished_session(outcome: FlowOutcome, session: Option<UserSession>, flow: &str) -> Result<UserSession> {
  match (outcome, session) {
    (FlowOutcome::Completed, Some(session)) => Ok(session),
    (outcome, _) => Err(AppError::Internal(format!("{} flow ended without a session: {:?}", flow, outcome))),
  }
}

#[instrument(name = "account::register", skip_all, fields(email = %form.email))]
pub async fn register(app_state: &AppState, form: RegisterForm) -> Result<UserSession> {
  let ctx = FlowState::new(RegisterCtxData {
    app_state: app_state.clone(),
    form,
    session: None,
  });
  let result = match app_state.flows.register.run(ctx.clone()).await {
    Ok(outcome) => {
      let session = ctx.read().session.clone();
      finished_session(outcome, session, "register")
    }
    Err(e) => Err(e),
  };
  app_state.report(result)
}

#[instrument(name = "account::login", skip_all, fields(email = %form.email))]
pub async fn login(app_state: &AppState, form: LoginForm) -> Result<UserSession> {
  let ctx = FlowState::new(LoginCtxData {
    app_state: app_state.clone(),
    form,
    session: None,
  });
  let result = match app_state.flows.login.run(ctx.clone()).await {
    Ok(outcome) => {
      let session = ctx.read().session.clone();
      finished_session(outcome, session, "login")
    }
    Err(e) => Err(e),
  };
  app_state.report(result)
}

/// Forgets the user and empties the cart.
#[instrument(name = "account::logout", skip_all)]
pub fn logout(app_state: &AppState) -> Result<()> {
  let cart_result = app_state.cart.update(|cart| cart.clear());
  if let Err(e) = &cart_result {
    warn!(error = %e, "Could not delete the persisted cart on logout.");
  }
  *app_state.session.write() = None;
  let result = app_state.session_store.clear();
  if result.is_ok() {
    app_state.notices.push(Notice::info("Logged Out!"));
  }
  app_state.report(result)
}

/// Asks the API to email a reset link. The server's reply becomes the notice.
#[instrument(name = "account::forgot_password", skip_all)]
pub async fn forgot_password(app_state: &AppState, email: &str) -> Result<()> {
  let result = async {
    validate_forgot_password(email).into_result()?;
    let message = app_state.api.forgot_password(email.trim()).await?;
    if let Some(message) = message {
      app_state.notices.push(Notice::success(message));
    }
    Ok::<_, AppError>(())
  }
  .await;
  app_state.report(result)
}

/// Checks the `id`/`token` pair from a reset link before showing the reset form.
#[instrument(name = "account::verify_reset_link", skip(app_state, token))]
pub async fn verify_reset_link(app_state: &AppState, user_id: &str, token: &str) -> Result<()> {
  let result = async {
    if user_id.trim().is_empty() || token.trim().is_empty() {
      return Err(AppError::Auth("Invalid password reset link.".to_string()));
    }
    app_state.api.verify_reset_link(user_id, token).await.map_err(|e| {
      warn!(error = %e, "Reset link rejected.");
      AppError::Auth("Password reset link expired or invalid.".to_string())
    })?;
    Ok::<_, AppError>(())
  }
  .await;
  app_state.report(result)
}

#[instrument(name = "account::reset_password", skip(app_state, token, form))]
pub async fn reset_password(app_state: &AppState, user_id: &str, token: &str, form: ResetPasswordForm) -> Result<()> {
  let result = async {
    form.validate().into_result()?;
    let message = app_state.api.reset_password(user_id, token, &form.password).await?;
    if let Some(message) = message {
      app_state.notices.push(Notice::success(message));
    }
    Ok::<_, AppError>(())
  }
  .await;
  app_state.report(result)
}
