// burgerbox_storefront/src/workflows/mod.rs

//! Storefront workflows. Multi-call operations (checkout, register, login) are
//! `burgerbox::Flow`s built once at start-up; single-call actions are plain
//! async functions over [`AppState`](crate::state::AppState).

pub mod account_flows;
pub mod admin;
pub mod catalog;
pub mod checkout_flow;
pub mod contexts;
pub mod orders;

use crate::errors::AppError;
use burgerbox::Flow;
use contexts::{CheckoutCtxData, LoginCtxData, RegisterCtxData};

pub use checkout_flow::{place_order, CheckoutOutcome};

/// The flows shared by every clone of the application state.
pub struct Workflows {
  pub checkout: Flow<CheckoutCtxData, AppError>,
  pub register: Flow<RegisterCtxData, AppError>,
  pub login: Flow<LoginCtxData, AppError>,
}

pub fn build_all() -> Workflows {
  let workflows = Workflows {
    checkout: checkout_flow::build_checkout_flow(),
    register: account_flows::build_register_flow(),
    login: account_flows::build_login_flow(),
  };
  tracing::debug!("Storefront workflows built.");
  workflows
}
