//! Fan-out/fan-in check orchestration.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, error, info};

use fleetcheck_core::{AgentReport, AgentSpec, Config, LogError};
use fleetcheck_logs::{fetch, summarize};
use fleetcheck_probe::{build_client, probe_agent};

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that abort a check pass before any agent task starts.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Run one complete check pass: every agent probed, at most
/// `config.concurrency` in flight, reports returned sorted by name.
///
/// The config is expected to be defaulted and validated already.
pub async fn run_checks(config: &Config) -> RunnerResult<Vec<AgentReport>> {
    let client = build_client(config.http_timeout(), config.insecure_tls)?;
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1) as usize));
    let reports = Arc::new(Mutex::new(Vec::with_capacity(config.agents.len())));
    let default_tail_lines = config.default_tail_lines;

    info!(
        agents = config.agents.len(),
        concurrency = config.concurrency,
        "starting check pass"
    );

    let mut handles = Vec::with_capacity(config.agents.len());
    for agent in config.agents.iter().cloned() {
        let semaphore = Arc::clone(&semaphore);
        let reports = Arc::clone(&reports);
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            // The semaphore is never closed, and the permit is dropped with
            // the task on every exit path.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            let report = check_agent(&client, default_tail_lines, &agent).await;
            reports.lock().await.push(report);
        }));
    }

    // Join barrier: no partial results are ever exposed.
    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "agent check task panicked");
        }
    }

    let mut reports = match Arc::try_unwrap(reports) {
        Ok(mutex) => mutex.into_inner(),
        // Unreachable after the join barrier, but harmless.
        Err(arc) => arc.lock().await.clone(),
    };
    reports.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(reports)
}

/// Check one agent: HTTP probes first, then the log tail.
pub async fn check_agent(
    client: &reqwest::Client,
    default_tail_lines: u32,
    agent: &AgentSpec,
) -> AgentReport {
    let checked_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut report = AgentReport::new(&agent.name, &agent.base_url, checked_at);

    probe_agent(client, agent, &mut report).await;
    debug!(agent = %agent.name, working = report.working, "probes done");

    let tail_lines = if agent.logs.tail_lines > 0 {
        agent.logs.tail_lines
    } else {
        default_tail_lines
    };

    match fetch(&agent.logs.backend, tail_lines).await {
        Ok(tail) => {
            let tail = tail.trim_end_matches('\n');
            if !tail.is_empty() {
                report.log_summary = Some(summarize(tail));
                report.log_tail = Some(tail.to_string());
            }
        }
        Err(err) => {
            // A timed-out fetch still keeps whatever arrived before the kill.
            if let LogError::Timeout { partial, .. } = &err {
                let partial = partial.trim_end_matches('\n');
                if !partial.is_empty() {
                    report.log_tail = Some(partial.to_string());
                }
            }
            report.notes.push(format!("log fetch failed: {err}"));
        }
    }

    report
}
