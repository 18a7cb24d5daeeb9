// tests/account_tests.rs
mod common;

use burgerbox::{MemoryStore, Severity, CART_KEY, SESSION_KEY};
use burgerbox_storefront::forms::{LoginForm, RegisterForm, ResetPasswordForm};
use burgerbox_storefront::workflows::account_flows;
use burgerbox_storefront::AppError;
use common::*;
use std::sync::Arc;

fn login_form() -> LoginForm {
  LoginForm {
    email: "asha@example.com".to_string(),
    password: "secret1".to_string(),
  }
}

#[tokio::test]
async fn login_persists_the_session_across_restarts() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let app = app_with(FakeApi::default(), ScriptedWidget::default(), store.clone());

  let user = account_flows::login(&app.state, login_form()).await.unwrap();

  assert_eq!(user, session(false));
  assert_eq!(app.state.current_user(), Some(session(false)));
  assert!(store.contains(SESSION_KEY));
  assert_eq!(app.state.notices.latest().unwrap().message, "Logged In!");
  assert_eq!(app.api.calls(), vec!["login"]);

  let restarted = app_with(FakeApi::default(), ScriptedWidget::default(), store);
  assert_eq!(restarted.state.current_user(), Some(session(false)));
}

#[tokio::test]
async fn rejected_login_shows_the_server_message() {
  setup_tracing();
  let api = FakeApi::default();
  *api.account.lock() = None;
  let app = app(api, ScriptedWidget::default());

  let err = account_flows::login(&app.state, login_form()).await.unwrap_err();

  assert!(matches!(err, AppError::Api { status: Some(401), .. }));
  let notice = app.state.notices.latest().unwrap();
  assert_eq!(notice.message, "Invalid credentials");
  assert_eq!(notice.severity, Severity::Error);
  assert!(app.state.current_user().is_none());
  assert!(!app.store.contains(SESSION_KEY));
}

#[tokio::test]
async fn invalid_forms_stop_before_the_api() {
  setup_tracing();
  let app = app(FakeApi::default(), ScriptedWidget::default());

  let err = account_flows::login(&app.state, LoginForm::default()).await.unwrap_err();
  assert!(matches!(err, AppError::Form(ref f) if f.len() == 2));

  let form = RegisterForm {
    name: "a b".to_string(),
    email: "asha@example.com".to_string(),
    password: "secret1".to_string(),
    confirm_password: "secret1".to_string(),
  };
  let err = account_flows::register(&app.state, form).await.unwrap_err();
  assert!(matches!(err, AppError::Form(_)));

  assert!(app.api.calls().is_empty());
  assert_eq!(
    app.state.notices.latest().unwrap().message,
    "Please fix the errors in the form!"
  );
}

#[tokio::test]
async fn registration_signs_the_user_in() {
  setup_tracing();
  let app = app(FakeApi::default(), ScriptedWidget::default());
  let form = RegisterForm {
    name: "asha".to_string(),
    email: "asha@example.com".to_string(),
    password: "secret1".to_string(),
    confirm_password: "secret1".to_string(),
  };

  account_flows::register(&app.state, form).await.unwrap();

  assert!(app.state.current_user().is_some());
  assert!(app.store.contains(SESSION_KEY));
  assert_eq!(app.state.notices.latest().unwrap().message, "User Registered!");
}

#[tokio::test]
async fn logout_forgets_the_user_and_empties_the_cart() {
  setup_tracing();
  let app = app(FakeApi::default(), ScriptedWidget::default());
  sign_in(&app, session(false));
  app.state.add_to_cart(&classic(), 2, "small").unwrap();
  assert!(app.store.contains(CART_KEY));

  account_flows::logout(&app.state).unwrap();

  assert!(app.state.current_user().is_none());
  assert!(app.state.cart.read().is_empty());
  assert!(!app.store.contains(CART_KEY));
  assert!(!app.store.contains(SESSION_KEY));
  let notice = app.state.notices.latest().unwrap();
  assert_eq!(notice.message, "Logged Out!");
  assert_eq!(notice.severity, Severity::Info);
}

#[tokio::test]
async fn password_recovery() {
  setup_tracing();
  let app = app(FakeApi::default(), ScriptedWidget::default());

  account_flows::forgot_password(&app.state, "asha@example.com").await.unwrap();
  assert_eq!(
    app.state.notices.latest().unwrap().message,
    "Password reset link sent to your email"
  );

  let err = account_flows::verify_reset_link(&app.state, "", "abc").await.unwrap_err();
  assert_eq!(err.notice().message, "Invalid password reset link.");
  let err = account_flows::verify_reset_link(&app.state, "u1", "expired").await.unwrap_err();
  assert_eq!(err.notice().message, "Password reset link expired or invalid.");
  account_flows::verify_reset_link(&app.state, "u1", "fresh").await.unwrap();

  let form = ResetPasswordForm {
    password: "newpass1".to_string(),
    confirm_password: "newpass1".to_string(),
  };
  account_flows::reset_password(&app.state, "u1", "fresh", form).await.unwrap();
  assert_eq!(app.state.notices.latest().unwrap().message, "Password updated");
  assert_eq!(
    app.api.calls(),
    vec!["forgot_password", "verify_reset_link", "verify_reset_link", "reset_password"]
  );
}
