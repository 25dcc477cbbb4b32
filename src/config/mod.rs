// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable prefix for overrides, e.g. `SMOKE_CHECK_BACKEND_URL`.
pub const ENV_PREFIX: &str = "SMOKE_CHECK";

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
        || path.extension().and_then(|s| s.to_str()) == Some("yml") {
        serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(&contents).context("Failed to parse JSON config")?
    };

    config.validate()?;
    Ok(config)
}

/// Read `SMOKE_CHECK_*` variables into overrides.
pub fn env_overrides() -> Result<Overrides> {
    let settings = ::config::Config::builder()
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to read environment overrides")?;

    settings
        .try_deserialize()
        .context("Invalid SMOKE_CHECK_* environment value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_yaml_config() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "timeout_ms: 1500\nbackend:\n  url: http://127.0.0.1:5055\n  status_field: services.worker\nfrontend:\n  name: Dashboard"
        )
        .unwrap();

        let config = load_config(file.path()).await.unwrap();

        assert_eq!(config.timeout_ms, 1500);
        assert_eq!(config.backend.url, "http://127.0.0.1:5055");
        assert_eq!(config.backend.status_field, "services.worker");
        assert_eq!(config.backend.health_path, "/health");
        assert_eq!(config.frontend.name, "Dashboard");
        assert_eq!(config.frontend.url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_load_json_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"exit_nonzero_on_failure": false, "title": "Staging"}}"#).unwrap();

        let config = load_config(file.path()).await.unwrap();

        assert!(!config.exit_nonzero_on_failure);
        assert_eq!(config.title, "Staging");
    }

    #[tokio::test]
    async fn test_load_config_validates() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "timeout_ms: 0").unwrap();

        assert!(load_config(file.path()).await.is_err());
    }

    // The only test that touches SMOKE_CHECK_* variables; keep it that way.
    #[test]
    fn test_env_overrides_then_cli() {
        std::env::set_var("SMOKE_CHECK_BACKEND_URL", "http://127.0.0.1:5055");
        std::env::set_var("SMOKE_CHECK_FRONTEND_URL", "http://127.0.0.1:3033");
        std::env::set_var("SMOKE_CHECK_TIMEOUT_MS", "1234");

        let from_env = env_overrides().unwrap();
        assert_eq!(from_env.backend_url.as_deref(), Some("http://127.0.0.1:5055"));
        assert_eq!(from_env.frontend_url.as_deref(), Some("http://127.0.0.1:3033"));
        assert_eq!(from_env.timeout_ms, Some(1234));

        let mut config = Config::default();
        config.apply_overrides(from_env);
        config.apply_overrides(Overrides {
            backend_url: Some("http://10.1.1.1:5000".to_string()),
            frontend_url: None,
            timeout_ms: None,
        });
        assert_eq!(config.backend.url, "http://10.1.1.1:5000");
        assert_eq!(config.frontend.url, "http://127.0.0.1:3033");
        assert_eq!(config.timeout_ms, 1234);

        std::env::set_var("SMOKE_CHECK_TIMEOUT_MS", "soon");
        let err = env_overrides().unwrap_err();
        assert!(err.to_string().contains("Invalid SMOKE_CHECK_* environment value"));

        std::env::remove_var("SMOKE_CHECK_BACKEND_URL");
        std::env::remove_var("SMOKE_CHECK_FRONTEND_URL");
        std::env::remove_var("SMOKE_CHECK_TIMEOUT_MS");

        let cleared = env_overrides().unwrap();
        assert!(cleared.backend_url.is_none());
        assert!(cleared.timeout_ms.is_none());
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let err = load_config("/nonexistent/smoke-check.yaml").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
