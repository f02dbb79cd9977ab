//! Endpoint probe logic.
//!
//! One GET per enabled check, classified by status code. Transport
//! failures are recorded on the probe result, never propagated — one
//! unreachable agent must not disturb the rest of the fleet.

use std::time::Instant;

use tracing::debug;

use fleetcheck_core::{AgentReport, AgentSpec, EndpointProbe};

/// User-Agent sent on every probe.
pub const USER_AGENT: &str = concat!("fleetcheck/", env!("CARGO_PKG_VERSION"));

/// Header carrying the agent's configured credential on the API check.
const API_KEY_HEADER: &str = "X-API-KEY";

/// Read at most this many bytes of a response body.
const BODY_READ_LIMIT: usize = 512;

/// Keep at most this many characters of the trimmed body as a hint.
const BODY_HINT_MAX: usize = 160;

/// Join a base URL and a path with exactly one slash.
///
/// Idempotent under trailing/leading slash variation; any query string in
/// `path` is carried through verbatim.
pub fn resolve(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Whether a status code counts as a successful probe: 2xx or 304.
pub fn status_ok(status: u16) -> bool {
    (200..=299).contains(&status) || status == 304
}

/// Issue one GET and classify the response.
pub async fn probe_url(
    client: &reqwest::Client,
    url: &str,
    headers: &[(&str, &str)],
) -> EndpointProbe {
    let start = Instant::now();
    let mut probe = EndpointProbe {
        url: url.to_string(),
        ok: false,
        status: 0,
        duration_ms: 0,
        error: None,
        body_hint: None,
    };

    let mut req = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Cache-Control", "no-cache");
    for (name, value) in headers {
        req = req.header(*name, *value);
    }

    let mut resp = match req.send().await {
        Ok(resp) => resp,
        Err(e) => {
            debug!(%url, error = %e, "probe request failed");
            probe.error = Some(e.to_string());
            probe.duration_ms = start.elapsed().as_millis() as u64;
            return probe;
        }
    };

    probe.status = resp.status().as_u16();
    probe.ok = status_ok(probe.status);
    probe.duration_ms = start.elapsed().as_millis() as u64;

    // Body read errors are ignored; the status already classified the probe.
    let mut body = Vec::with_capacity(BODY_READ_LIMIT);
    while let Ok(Some(chunk)) = resp.chunk().await {
        body.extend_from_slice(&chunk);
        if body.len() >= BODY_READ_LIMIT {
            body.truncate(BODY_READ_LIMIT);
            break;
        }
    }
    probe.body_hint = body_hint(&body);

    probe
}

fn body_hint(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut chars = trimmed.chars();
    let hint: String = chars.by_ref().take(BODY_HINT_MAX).collect();
    if chars.next().is_some() {
        Some(format!("{hint}..."))
    } else {
        Some(hint)
    }
}

/// Run the enabled checks for one agent, sequentially, filling the report's
/// probe slots and notes. Sets `working` from the completed probes.
pub async fn probe_agent(client: &reqwest::Client, agent: &AgentSpec, report: &mut AgentReport) {
    if agent.checks.healthz {
        let url = resolve(&agent.base_url, "/healthz");
        let probe = probe_url(client, &url, &[]).await;
        note_not_enabled(&probe, "/healthz", &mut report.notes);
        report.healthz = Some(probe);
    }

    if agent.checks.readiness {
        let url = resolve(&agent.base_url, "/healthz/readiness");
        let probe = probe_url(client, &url, &[]).await;
        note_not_enabled(&probe, "/healthz/readiness", &mut report.notes);
        report.readiness = Some(probe);
    }

    if agent.checks.metrics {
        let url = resolve(&agent.base_url, "/metrics");
        let probe = probe_url(client, &url, &[]).await;
        note_not_enabled(&probe, "/metrics", &mut report.notes);
        report.metrics = Some(probe);
    }

    if agent.checks.api {
        match agent.api_key.as_deref().map(str::trim) {
            None | Some("") => {
                report
                    .notes
                    .push("api check enabled but api_key missing; skipping API check".to_string());
            }
            Some(key) => {
                let path = format!(
                    "/api/v{}/workflows?active=true&limit=1",
                    agent.api_version
                );
                let url = resolve(&agent.base_url, &path);
                report.api = Some(probe_url(client, &url, &[(API_KEY_HEADER, key)]).await);
            }
        }
    }

    report.working = report.compute_working();
}

/// A 404 on a plain endpoint usually means the feature is off, not broken.
fn note_not_enabled(probe: &EndpointProbe, path: &str, notes: &mut Vec<String>) {
    if probe.status == 404 {
        notes.push(format!("{path} returned 404 (likely not enabled)"));
    }
}
