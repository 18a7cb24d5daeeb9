// burgerbox_storefront/src/forms.rs

//! Client-side form validation. Each validator returns every failing field
//! with the message shown under it.

use crate::errors::{AppError, Result};
use crate::models::ContactDetails;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

// Unanchored: any input containing a substring of this shape passes.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static regex"));
static TEN_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("static regex"));
static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("static regex"));

/// Field name to message, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.entry(field).or_insert_with(|| message.into());
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.0.get(field).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
    self.0.iter().map(|(k, v)| (*k, v.as_str()))
  }

  /// `Ok(())` when nothing failed, otherwise `AppError::Form`.
  pub fn into_result(self) -> Result<()> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(AppError::Form(self))
    }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    f.write_str(&parts.join("; "))
  }
}

pub fn is_valid_email(email: &str) -> bool {
  EMAIL_SHAPE.is_match(email)
}

fn check_email(errors: &mut FieldErrors, email: &str) {
  if email.trim().is_empty() {
    errors.insert("email", "Email is required.");
  } else if !is_valid_email(email) {
    errors.insert("email", "Please enter a valid email address.");
  }
}

fn check_new_password(errors: &mut FieldErrors, password: &str, confirm_password: &str) {
  if password.trim().is_empty() {
    errors.insert("password", "Password is required.");
  } else if password.chars().count() < 6 {
    errors.insert("password", "Password must be at least 6 characters.");
  } else if password.contains(' ') {
    errors.insert("password", "Password should not contain any spaces.");
  }

  if confirm_password.trim().is_empty() {
    errors.insert("confirmPassword", "Please confirm your password.");
  } else if password != confirm_password {
    errors.insert("confirmPassword", "Passwords do not match.");
  }
}

pub fn validate_contact(details: &ContactDetails) -> FieldErrors {
  let mut errors = FieldErrors::new();
  if details.name.trim().is_empty() {
    errors.insert("name", "Name is required.");
  }
  check_email(&mut errors, &details.email);
  if details.address.trim().is_empty() || details.address.chars().count() < 10 {
    errors.insert("address", "Address must be at least 10 characters.");
  }
  if !TEN_DIGITS.is_match(&details.phone) {
    errors.insert("phone", "Valid 10-digit phone number is required.");
  }
  errors
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
  pub name: String,
  pub email: String,
  pub password: String,
  pub confirm_password: String,
}

impl RegisterForm {
  pub fn validate(&self) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if self.name.trim().is_empty() {
      errors.insert("name", "Username is required.");
    } else if self.name.chars().count() < 3 {
      errors.insert("name", "Username must be at least 3 characters.");
    } else if !ALPHANUMERIC.is_match(&self.name) {
      errors.insert("name", "Username can only contain letters and numbers, without spaces.");
    }
    check_email(&mut errors, &self.email);
    check_new_password(&mut errors, &self.password, &self.confirm_password);
    errors
  }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
  pub email: String,
  pub password: String,
}

impl LoginForm {
  pub fn validate(&self) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &self.email);
    if self.password.trim().is_empty() {
      errors.insert("password", "Password is required.");
    }
    errors
  }
}

pub fn validate_forgot_password(email: &str) -> FieldErrors {
  let mut errors = FieldErrors::new();
  check_email(&mut errors, email);
  errors
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
  pub password: String,
  pub confirm_password: String,
}

impl ResetPasswordForm {
  pub fn validate(&self) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_new_password(&mut errors, &self.password, &self.confirm_password);
    errors
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn contact(name: &str, email: &str, address: &str, phone: &str) -> ContactDetails {
    ContactDetails {
      user_id: "u1".into(),
      name: name.into(),
      email: email.into(),
      address: address.into(),
      phone: phone.into(),
    }
  }

  #[test]
  fn email_shape_follows_browser_check() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@mail.example.com"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@b.com"));
    assert!(!is_valid_email("a b@c"));
  }

  #[test]
  fn contact_form_reports_each_field() {
    let errors = validate_contact(&contact("", "nope", "short", "12345"));
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get("name"), Some("Name is required."));
    assert_eq!(errors.get("email"), Some("Please enter a valid email address."));
    assert_eq!(errors.get("address"), Some("Address must be at least 10 characters."));
    assert_eq!(errors.get("phone"), Some("Valid 10-digit phone number is required."));

    let errors = validate_contact(&contact("Asha", "", "12 Long Street", "98765432101"));
    assert_eq!(errors.get("email"), Some("Email is required."));
    assert!(errors.get("phone").is_some());

    assert!(validate_contact(&contact("Asha", "asha@example.com", "12 Long Street", "9876543210")).is_empty());
  }

  #[test]
  fn register_form_rules() {
    let mut form = RegisterForm {
      name: "ab".into(),
      email: "asha@example.com".into(),
      password: "pass word".into(),
      confirm_password: "different".into(),
    };
    let errors = form.validate();
    assert_eq!(errors.get("name"), Some("Username must be at least 3 characters."));
    assert_eq!(errors.get("password"), Some("Password should not contain any spaces."));
    assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match."));

    form.name = "asha k".into();
    assert_eq!(
      form.validate().get("name"),
      Some("Username can only contain letters and numbers, without spaces.")
    );

    form.name = "asha".into();
    form.password = "secret1".into();
    form.confirm_password = "secret1".into();
    assert!(form.validate().is_empty());
  }

  #[test]
  fn login_and_reset_forms() {
    let errors = LoginForm::default().validate();
    assert_eq!(errors.get("email"), Some("Email is required."));
    assert_eq!(errors.get("password"), Some("Password is required."));

    let errors = ResetPasswordForm {
      password: "12345".into(),
      confirm_password: String::new(),
    }
    .validate();
    assert_eq!(errors.get("password"), Some("Password must be at least 6 characters."));
    assert_eq!(errors.get("confirmPassword"), Some("Please confirm your password."));

    assert!(validate_forgot_password("x@y.z").is_empty());
  }

  #[test]
  fn empty_errors_convert_to_ok() {
    assert!(FieldErrors::new().into_result().is_ok());
    let mut errors = FieldErrors::new();
    errors.insert("email", "Email is required.");
    assert!(matches!(errors.into_result(), Err(AppError::Form(_))));
  }
}
