// src/config/models.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shown in the report header after "Testing".
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// When false the process exits 0 even if a probe failed.
    #[serde(default = "default_true")]
    pub exit_nonzero_on_failure: bool,

    /// Route probes through HTTP(S)_PROXY. Off by default since targets are local.
    #[serde(default)]
    pub use_system_proxy: bool,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub frontend: FrontendConfig,

    /// Printed as a numbered list when every probe passes.
    /// `{frontend_url}` is replaced with the frontend address.
    #[serde(default = "default_next_steps")]
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_name")]
    pub name: String,

    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Field of the health payload to report. Dots address nested objects.
    #[serde(default = "default_status_field")]
    pub status_field: String,

    #[serde(default = "default_status_label")]
    pub status_label: String,

    /// Printed after the name when the probe passes.
    #[serde(default = "default_backend_ok_label")]
    pub ok_label: String,

    #[serde(default = "default_backend_start_hint")]
    pub start_hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_name")]
    pub name: String,

    #[serde(default = "default_frontend_url")]
    pub url: String,

    #[serde(default = "default_frontend_ok_label")]
    pub ok_label: String,

    #[serde(default = "default_frontend_start_hint")]
    pub start_hint: String,
}

/// Values that may replace file settings, from the environment or the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub frontend_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

fn default_title() -> String {
    "VR 180 Platform Services".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_next_steps() -> Vec<String> {
    vec![
        "Open {frontend_url} in your browser".to_string(),
        "Upload a video file".to_string(),
        "Watch it get converted to VR 180 format".to_string(),
    ]
}

fn default_backend_name() -> String {
    "Express backend".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_status_field() -> String {
    "python_service".to_string()
}

fn default_status_label() -> String {
    "Python service status".to_string()
}

fn default_backend_ok_label() -> String {
    "is healthy".to_string()
}

fn default_backend_start_hint() -> String {
    "Start Express backend: cd backend && npm start".to_string()
}

fn default_frontend_name() -> String {
    "React frontend".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_frontend_ok_label() -> String {
    "is accessible".to_string()
}

fn default_frontend_start_hint() -> String {
    "Start React frontend: cd frontend && npm run dev".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            timeout_ms: default_timeout_ms(),
            exit_nonzero_on_failure: true,
            use_system_proxy: false,
            backend: BackendConfig::default(),
            frontend: FrontendConfig::default(),
            next_steps: default_next_steps(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            name: default_backend_name(),
            url: default_backend_url(),
            health_path: default_health_path(),
            status_field: default_status_field(),
            status_label: default_status_label(),
            ok_label: default_backend_ok_label(),
            start_hint: default_backend_start_hint(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            name: default_frontend_name(),
            url: default_frontend_url(),
            ok_label: default_frontend_ok_label(),
            start_hint: default_frontend_start_hint(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Later sources win: call with environment overrides first, then CLI flags.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.backend_url {
            self.backend.url = url;
        }
        if let Some(url) = overrides.frontend_url {
            self.frontend.url = url;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            bail!("timeout_ms must be greater than zero");
        }
        self.backend
            .health_url()
            .with_context(|| format!("Invalid backend address for {}", self.backend.name))?;
        self.frontend
            .root_url()
            .with_context(|| format!("Invalid frontend address for {}", self.frontend.name))?;
        if self.backend.status_field.trim().is_empty() {
            bail!("backend.status_field must not be empty");
        }
        Ok(())
    }
}

impl BackendConfig {
    pub fn health_url(&self) -> Result<Url> {
        let base = parse_http_url(&self.url)?;
        let url = base
            .join(&self.health_path)
            .with_context(|| format!("Cannot join health path {:?}", self.health_path))?;
        Ok(url)
    }
}

impl FrontendConfig {
    pub fn root_url(&self) -> Result<Url> {
        parse_http_url(&self.url)
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Failed to parse URL {:?}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Unsupported scheme {:?} in {}", other, raw),
    }
}
