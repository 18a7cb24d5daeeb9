// burgerbox_storefront/src/lib.rs

//! The BurgerBox storefront client: configuration, the REST API client, the
//! checkout and account workflows, and the terminal front end built on the
//! `burgerbox` core.

pub mod cli;
pub mod config;
pub mod errors;
pub mod forms;
pub mod models;
pub mod notices;
pub mod pagination;
pub mod services;
pub mod session;
pub mod state;
pub mod workflows;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
