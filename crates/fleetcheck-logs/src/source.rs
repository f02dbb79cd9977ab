//! Backend dispatch for log retrieval.
//!
//! The match below is exhaustive over [`LogBackend`]; a new backend kind
//! cannot be added without deciding how to fetch it. Required fields are
//! re-checked here even though the config validates them eagerly, so a
//! hand-built backend still fails cleanly instead of invoking a tool with
//! a blank argument.

use std::path::Path;

use fleetcheck_core::{LogBackend, LogError};

use crate::exec::{run_command, run_shell};
use crate::tail::tail_file;

/// Produce the raw log blob for one agent.
///
/// `tail_lines` is the effective count — the caller has already applied
/// the global default when the agent's override was 0.
pub async fn fetch(backend: &LogBackend, tail_lines: u32) -> Result<String, LogError> {
    match backend {
        LogBackend::None => Ok(String::new()),

        LogBackend::File { path } => {
            if path.trim().is_empty() {
                return Err(missing(backend, "path"));
            }
            tail_file(Path::new(path), tail_lines)
        }

        LogBackend::Docker { container, args } => {
            if container.trim().is_empty() {
                return Err(missing(backend, "container"));
            }
            let mut cmd_args = vec![
                "logs".to_string(),
                "--tail".to_string(),
                tail_lines.to_string(),
            ];
            cmd_args.extend(args.iter().cloned());
            cmd_args.push(container.clone());
            run_command("docker", &cmd_args).await
        }

        LogBackend::Command { cmd } => {
            if cmd.trim().is_empty() {
                return Err(missing(backend, "cmd"));
            }
            run_shell(cmd).await
        }

        LogBackend::Ssh { host, cmd, args } => {
            if host.trim().is_empty() {
                return Err(missing(backend, "host"));
            }
            if cmd.trim().is_empty() {
                return Err(missing(backend, "cmd"));
            }
            let mut ssh_args = args.clone();
            ssh_args.push(host.clone());
            ssh_args.push(cmd.clone());
            run_command("ssh", &ssh_args).await
        }
    }
}

fn missing(backend: &LogBackend, field: &'static str) -> LogError {
    LogError::Missing {
        backend: backend.kind(),
        field,
    }
}
