// src/report/mod.rs
//! Console report: header banner, one block per probe, closing summary.

use crate::health::{CheckStatus, RunSummary, ServiceCheckResult};
use std::io::{self, Write};

const BANNER_WIDTH: usize = 40;

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

pub fn write_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "🧪 Testing {}", title)?;
    writeln!(out, "{}", banner())
}

pub fn write_result<W: Write>(out: &mut W, result: &ServiceCheckResult) -> io::Result<()> {
    match &result.status {
        CheckStatus::Healthy { detail } => {
            writeln!(out, "✅ {} {}", result.service_name, result.ok_label)?;
            if let Some(detail) = detail {
                writeln!(out, "   {}", detail)?;
            }
        }
        CheckStatus::Failed(err) => {
            writeln!(out, "❌ {} {}", result.service_name, err)?;
        }
    }
    Ok(())
}

/// `next_steps` entries may contain `{frontend_url}`.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    next_steps: &[String],
    frontend_url: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", banner())?;

    if summary.all_healthy() {
        writeln!(out, "🎉 All services are running correctly!")?;
        if !next_steps.is_empty() {
            writeln!(out)?;
            writeln!(out, "You can now:")?;
            for (i, step) in next_steps.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, step.replace("{frontend_url}", frontend_url))?;
            }
        }
    } else {
        writeln!(out, "⚠️  Some services are not running properly")?;
        writeln!(out)?;
        writeln!(out, "Please check:")?;
        for failed in summary.failed() {
            writeln!(out, "- {}", failed.remediation)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ProbeError;

    fn healthy(name: &str, detail: Option<&str>) -> ServiceCheckResult {
        ServiceCheckResult {
            service_name: name.to_string(),
            status: CheckStatus::Healthy {
                detail: detail.map(str::to_string),
            },
            ok_label: "is healthy".to_string(),
            remediation: format!("Start {}", name),
            response_time_ms: 2,
        }
    }

    fn failed(name: &str, err: ProbeError) -> ServiceCheckResult {
        ServiceCheckResult {
            service_name: name.to_string(),
            status: CheckStatus::Failed(err),
            ok_label: "is healthy".to_string(),
            remediation: format!("Start {}", name),
            response_time_ms: 2,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header() {
        let text = render(|out| write_header(out, "VR 180 Platform Services"));
        assert_eq!(
            text,
            format!("🧪 Testing VR 180 Platform Services\n{}\n", "=".repeat(40))
        );
    }

    #[test]
    fn test_healthy_line_with_detail() {
        let r = healthy("Express backend", Some("Python service status: running"));
        let text = render(|out| write_result(out, &r));
        assert_eq!(
            text,
            "✅ Express backend is healthy\n   Python service status: running\n"
        );
    }

    #[test]
    fn test_healthy_line_uses_ok_label() {
        let r = ServiceCheckResult {
            ok_label: "is accessible".to_string(),
            ..healthy("React frontend", None)
        };
        assert_eq!(render(|out| write_result(out, &r)), "✅ React frontend is accessible\n");
    }

    #[test]
    fn test_failure_lines_differ_by_kind() {
        let down = failed("React frontend", ProbeError::Unreachable("connection refused".into()));
        let sick = failed("Express backend", ProbeError::UnhealthyResponse("HTTP 503".into()));

        assert_eq!(
            render(|out| write_result(out, &down)),
            "❌ React frontend not accessible: connection refused\n"
        );
        assert_eq!(
            render(|out| write_result(out, &sick)),
            "❌ Express backend health check failed: HTTP 503\n"
        );
    }

    #[test]
    fn test_success_summary_lists_next_steps() {
        let summary = RunSummary::new(vec![healthy("a", None), healthy("b", None)]);
        let steps = vec!["Open {frontend_url} in your browser".to_string(), "Relax".to_string()];
        let text = render(|out| write_summary(out, &summary, &steps, "http://localhost:3000/"));

        assert!(text.contains("🎉 All services are running correctly!"));
        assert!(text.contains("1. Open http://localhost:3000/ in your browser\n"));
        assert!(text.contains("2. Relax\n"));
        assert!(!text.contains("Please check:"));
    }

    #[test]
    fn test_failure_summary_only_names_failed_services() {
        let summary = RunSummary::new(vec![
            healthy("Express backend", None),
            failed("React frontend", ProbeError::Unreachable("timeout".into())),
        ]);
        let text = render(|out| write_summary(out, &summary, &[], "http://x/"));

        assert!(text.contains("⚠️  Some services are not running properly"));
        assert!(text.contains("- Start React frontend\n"));
        assert!(!text.contains("- Start Express backend"));
        assert!(!text.contains("You can now:"));
    }
}
