// src/health/checker.rs
use super::probe::{BackendProbe, FrontendProbe, Probe};
use super::status::{CheckStatus, ProbeError, RunSummary, ServiceCheckResult};
use crate::config::Config;
use crate::report;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::io::{self, Write};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Probes the backend health endpoint and the frontend root, once each, in order.
pub struct ServiceChecker {
    config: Config,
    client: Client,
    backend: BackendProbe,
    frontend: FrontendProbe,
}

impl ServiceChecker {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let backend = BackendProbe::new(&config.backend)?;
        let frontend = FrontendProbe::new(&config.frontend)?;

        Ok(Self {
            config,
            client,
            backend,
            frontend,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn check_backend(&self) -> ServiceCheckResult {
        self.check(&self.backend).await
    }

    pub async fn check_frontend(&self) -> ServiceCheckResult {
        self.check(&self.frontend).await
    }

    /// Run both probes, writing the report to `out` as results arrive.
    /// Probe failures end up in the summary; only write errors are returned.
    pub async fn run<W: Write>(&self, out: &mut W) -> io::Result<RunSummary> {
        report::write_header(out, &self.config.title)?;

        let mut results = Vec::with_capacity(2);
        for probe in [&self.backend as &dyn Probe, &self.frontend] {
            let result = self.check(probe).await;
            report::write_result(out, &result)?;
            results.push(result);
        }

        let summary = RunSummary::new(results);
        report::write_summary(
            out,
            &summary,
            &self.config.next_steps,
            &self.config.frontend.url,
        )?;
        out.flush()?;

        info!(
            "Smoke check complete: {}/{} services healthy",
            summary.healthy_count(),
            summary.results.len()
        );
        Ok(summary)
    }

    async fn check(&self, probe: &dyn Probe) -> ServiceCheckResult {
        let start = std::time::Instant::now();

        let result = timeout(
            self.config.timeout(),
            self.client.get(probe.url().as_str()).send(),
        )
        .await;

        let status = match result {
            Ok(Ok(response)) if response.status() == StatusCode::OK => {
                match probe.inspect(response).await {
                    Ok(detail) => CheckStatus::Healthy { detail },
                    Err(e) => CheckStatus::Failed(e),
                }
            }
            Ok(Ok(response)) => CheckStatus::Failed(ProbeError::UnhealthyResponse(format!(
                "HTTP {}",
                response.status()
            ))),
            Ok(Err(e)) => CheckStatus::Failed(ProbeError::Unreachable(e.to_string())),
            Err(_) => CheckStatus::Failed(ProbeError::Unreachable("Request timeout".to_string())),
        };

        let response_time_ms = start.elapsed().as_millis() as u64;

        match &status {
            CheckStatus::Healthy { .. } => {
                debug!("{} is healthy ({} ms)", probe.name(), response_time_ms);
            }
            CheckStatus::Failed(e) => {
                warn!("{} at {} {}", probe.name(), probe.url(), e);
            }
        }

        ServiceCheckResult {
            service_name: probe.name().to_string(),
            status,
            ok_label: probe.ok_label().to_string(),
            remediation: probe.start_hint().to_string(),
            response_time_ms,
        }
    }
}
