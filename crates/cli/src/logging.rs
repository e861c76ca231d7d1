//! Diagnostic logging setup
//!
//! Operator diagnostics go to stderr through `tracing`; the script transcript
//! and scan results go to stdout.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: standard `EnvFilter` directives (e.g. `workbench_core=debug`)
//! - `WORKBENCH_LOG_FORMAT`: `json` for structured output, anything else for
//!   the human-readable format

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "workbench_cli=info,workbench_core=warn,workbench_infra_system=warn";

pub fn init_logging() {
    let log_format =
        std::env::var("WORKBENCH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
