//! Human-readable report rendering.

use std::fmt::Write;

use fleetcheck_core::{AgentReport, EndpointProbe};

/// Render the report list as the line-oriented text format.
pub fn render_text(reports: &[AgentReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let status = if report.working { "OK" } else { "FAIL" };
        let _ = writeln!(
            out,
            "\n== {} ({}) -> {} ==",
            report.name, report.base_url, status
        );
        for note in &report.notes {
            let _ = writeln!(out, "  note: {note}");
        }
        render_endpoint(&mut out, "healthz", report.healthz.as_ref());
        render_endpoint(&mut out, "readiness", report.readiness.as_ref());
        render_endpoint(&mut out, "metrics", report.metrics.as_ref());
        render_endpoint(&mut out, "api", report.api.as_ref());

        if let Some(summary) = &report.log_summary {
            let _ = writeln!(out, "  logs: {summary}");
        }
        if let Some(tail) = &report.log_tail {
            let _ = writeln!(out, "---- log tail ----\n{tail}\n------------------");
        }
    }
    out
}

fn render_endpoint(out: &mut String, label: &str, probe: Option<&EndpointProbe>) {
    let Some(probe) = probe else {
        return;
    };
    let ok = if probe.ok { "OK" } else { "BAD" };
    let hint = probe
        .body_hint
        .as_deref()
        .map(|h| format!(" | {h}"))
        .unwrap_or_default();
    let _ = match &probe.error {
        Some(err) => writeln!(
            out,
            "  {label:<9} {ok} ({}) in {}ms | err={err}{hint}",
            probe.status, probe.duration_ms
        ),
        None => writeln!(
            out,
            "  {label:<9} {ok} ({}) in {}ms{hint}",
            probe.status, probe.duration_ms
        ),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(ok: bool, status: u16) -> EndpointProbe {
        EndpointProbe {
            url: "https://host/healthz".to_string(),
            ok,
            status,
            duration_ms: 42,
            error: None,
            body_hint: Some(r#"{"status":"ok"}"#.to_string()),
        }
    }

    #[test]
    fn renders_working_agent() {
        let mut report = AgentReport::new("prod", "https://host:5678", 0);
        report.healthz = Some(probe(true, 200));
        report.working = true;
        report.log_summary = Some("tail=12 chars".to_string());
        report.log_tail = Some("last line".to_string());

        let text = render_text(&[report]);
        assert!(text.contains("== prod (https://host:5678) -> OK =="));
        assert!(text.contains("healthz   OK (200) in 42ms | {\"status\":\"ok\"}"));
        assert!(text.contains("logs: tail=12 chars"));
        assert!(text.contains("---- log tail ----\nlast line\n------------------"));
    }

    #[test]
    fn renders_failures_and_notes() {
        let mut report = AgentReport::new("down", "https://host", 0);
        report.readiness = Some(EndpointProbe {
            error: Some("connection refused".to_string()),
            body_hint: None,
            ..probe(false, 0)
        });
        report.notes.push("log fetch failed: boom".to_string());

        let text = render_text(&[report]);
        assert!(text.contains("== down (https://host) -> FAIL =="));
        assert!(text.contains("note: log fetch failed: boom"));
        assert!(text.contains("readiness BAD (0) in 42ms | err=connection refused"));
        assert!(!text.contains("healthz"));
    }
}
