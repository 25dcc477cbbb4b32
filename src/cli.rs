// src/cli.rs
use crate::config::Overrides;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset: failed probes are logged on stderr too.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Smoke test for the VR 180 platform: probes the backend health endpoint
/// and the frontend root once each and reports what is down.
#[derive(Parser, Debug)]
#[command(name = "smoke-check")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SMOKE_CHECK_BACKEND_URL      Backend base URL (default: http://localhost:5000)
    SMOKE_CHECK_FRONTEND_URL     Frontend URL (default: http://localhost:3000)
    SMOKE_CHECK_TIMEOUT_MS       Per-request timeout in milliseconds (default: 3000)
    RUST_LOG                     Log filter for diagnostics on stderr (default: warn)
"#)]
pub struct Cli {
    /// YAML (.yaml/.yml) or JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL; the health path is appended
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Frontend URL
    #[arg(long)]
    pub frontend_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Exit 0 even when a service is down
    #[arg(long)]
    pub exit_zero: bool,
}

pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            backend_url: self.backend_url.clone(),
            frontend_url: self.frontend_url.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}
