// src/health/status.rs

/// Why a probe failed. Captured in the result, never propagated past the checker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// Connection refused, timeout, DNS failure.
    #[error("not accessible: {0}")]
    Unreachable(String),

    /// The service answered, but not with a usable 200.
    #[error("health check failed: {0}")]
    UnhealthyResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Healthy { detail: Option<String> },
    Failed(ProbeError),
}

#[derive(Debug, Clone)]
pub struct ServiceCheckResult {
    pub service_name: String,
    pub status: CheckStatus,
    /// Phrase after the name on success, e.g. "is healthy".
    pub ok_label: String,
    /// Operator instruction printed when this probe fails.
    pub remediation: String,
    pub response_time_ms: u64,
}

impl ServiceCheckResult {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status, CheckStatus::Healthy { .. })
    }

    /// True when a connection was made, whatever the status code.
    pub fn is_reachable(&self) -> bool {
        !matches!(self.status, CheckStatus::Failed(ProbeError::Unreachable(_)))
    }

    pub fn detail(&self) -> Option<&str> {
        match &self.status {
            CheckStatus::Healthy { detail } => detail.as_deref(),
            CheckStatus::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ProbeError> {
        match &self.status {
            CheckStatus::Healthy { .. } => None,
            CheckStatus::Failed(e) => Some(e),
        }
    }
}

/// Results of one run, in probe order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub results: Vec<ServiceCheckResult>,
}

impl RunSummary {
    pub fn new(results: Vec<ServiceCheckResult>) -> Self {
        Self { results }
    }

    pub fn all_healthy(&self) -> bool {
        self.results.iter().all(ServiceCheckResult::is_healthy)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ServiceCheckResult> {
        self.results.iter().filter(|r| !r.is_healthy())
    }

    pub fn healthy_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_healthy()).count()
    }
}
