// burgerbox_storefront/src/main.rs

use burgerbox::{FileStore, Severity};
use burgerbox_storefront::cli::{self, Cli};
use burgerbox_storefront::services::{ApiClient, PromptWidget};
use burgerbox_storefront::config::log_filter;
use burgerbox_storefront::{AppConfig, AppState};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> ExitCode {
  // Logs on stderr, command output on stdout. RUST_LOG overrides the level.
  tracing_subscriber::fmt()
    .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr)
    .init();

  let args = Cli::parse();

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      eprintln!("{}", e);
      return ExitCode::FAILURE;
    }
  };

  let store = match FileStore::open(app_config.data_dir.clone()) {
    Ok(store) => Arc::new(store),
    Err(e) => {
      tracing::error!(error = %e, "Failed to open the local data directory.");
      eprintln!("{}", e);
      return ExitCode::FAILURE;
    }
  };

  let api = match ApiClient::new(&app_config) {
    Ok(api) => Arc::new(api),
    Err(e) => {
      tracing::error!(error = %e, "Failed to build the HTTP client.");
      eprintln!("{}", e);
      return ExitCode::FAILURE;
    }
  };

  let app_state = AppState::new(app_config, api, Arc::new(PromptWidget::stdin()), store);
  tracing::info!("Storefront client ready.");

  let result = cli::run(&app_state, args.command).await;

  for notice in app_state.notices.drain() {
    if notice.severity == Severity::Error {
      eprintln!("{}", notice);
    } else {
      println!("{}", notice);
    }
  }
  if result.is_err() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
