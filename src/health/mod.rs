// src/health/mod.rs
mod checker;
mod probe;
mod status;

pub use checker::ServiceChecker;
pub use probe::{extract_status, BackendProbe, FrontendProbe, Probe, UNKNOWN_STATUS};
pub use status::{CheckStatus, ProbeError, RunSummary, ServiceCheckResult};
