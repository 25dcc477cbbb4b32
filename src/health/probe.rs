// src/health/probe.rs
use super::status::ProbeError;
use crate::config::{BackendConfig, FrontendConfig};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Response;
use serde_json::Value;
use url::Url;

/// Placeholder reported when the health payload has no status field.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// One target service. The checker owns the request; a probe only knows
/// where to send it and how to read a 200 answer.
#[async_trait]
pub trait Probe: Send + Sync {
    fn name(&self) -> &str;

    fn url(&self) -> &Url;

    fn start_hint(&self) -> &str;

    fn ok_label(&self) -> &str;

    /// Inspect a 200 response. `Ok` carries the optional detail line.
    async fn inspect(&self, response: Response) -> Result<Option<String>, ProbeError>;
}

pub struct BackendProbe {
    name: String,
    url: Url,
    status_field: String,
    status_label: String,
    ok_label: String,
    start_hint: String,
}

impl BackendProbe {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            url: config.health_url()?,
            status_field: config.status_field.clone(),
            status_label: config.status_label.clone(),
            ok_label: config.ok_label.clone(),
            start_hint: config.start_hint.clone(),
        })
    }
}

#[async_trait]
impl Probe for BackendProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn start_hint(&self) -> &str {
        &self.start_hint
    }

    fn ok_label(&self) -> &str {
        &self.ok_label
    }

    async fn inspect(&self, response: Response) -> Result<Option<String>, ProbeError> {
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProbeError::UnhealthyResponse(format!("invalid health payload: {}", e)))?;

        let status = extract_status(&payload, &self.status_field)?;
        Ok(Some(format!("{}: {}", self.status_label, status)))
    }
}

pub struct FrontendProbe {
    name: String,
    url: Url,
    ok_label: String,
    start_hint: String,
}

impl FrontendProbe {
    pub fn new(config: &FrontendConfig) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            url: config.root_url()?,
            ok_label: config.ok_label.clone(),
            start_hint: config.start_hint.clone(),
        })
    }
}

#[async_trait]
impl Probe for FrontendProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn start_hint(&self) -> &str {
        &self.start_hint
    }

    fn ok_label(&self) -> &str {
        &self.ok_label
    }

    async fn inspect(&self, _response: Response) -> Result<Option<String>, ProbeError> {
        Ok(None)
    }
}

/// Read `field` from a health payload. Dots step into nested objects.
pub fn extract_status(payload: &Value, field: &str) -> Result<String, ProbeError> {
    if !payload.is_object() {
        return Err(ProbeError::UnhealthyResponse(
            "health payload is not a JSON object".to_string(),
        ));
    }

    let pointer: String = field
        .split('.')
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect();

    let status = match payload.pointer(&pointer) {
        None | Some(Value::Null) => UNKNOWN_STATUS.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    Ok(status)
}
