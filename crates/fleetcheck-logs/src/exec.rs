//! Bounded external process execution.
//!
//! Log retrieval shells out to `docker`, `ssh`, or an arbitrary command.
//! Every invocation gets a hard deadline; a hung remote host must not
//! stall the whole check pass.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

use fleetcheck_core::LogError;

/// Hard deadline for any external log-retrieval process.
pub const EXEC_TIMEOUT: Duration = Duration::from_secs(15);

/// Run `bin` with `args`, capturing stdout. Nonzero exit surfaces the
/// trimmed stderr; a blown deadline kills the child and returns
/// [`LogError::Timeout`] carrying the stdout captured so far.
pub async fn run_command(bin: &str, args: &[String]) -> Result<String, LogError> {
    run_with_deadline(bin, args, EXEC_TIMEOUT).await
}

/// Run a command line through the shell.
pub async fn run_shell(command: &str) -> Result<String, LogError> {
    run_command("/bin/sh", &["-c".to_string(), command.to_string()]).await
}

pub(crate) async fn run_with_deadline(
    bin: &str,
    args: &[String],
    deadline: Duration,
) -> Result<String, LogError> {
    debug!(%bin, ?args, "running log command");

    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| LogError::Spawn {
            bin: bin.to_string(),
            source,
        })?;

    let mut stdout = child.stdout.take().expect("stdout was piped");
    let mut stderr = child.stderr.take().expect("stderr was piped");
    let mut out = Vec::new();
    let mut err = Vec::new();

    // Drain both pipes while waiting so a chatty child can't deadlock on
    // a full pipe buffer.
    let wait = async {
        let (_, _, status) = tokio::join!(
            stdout.read_to_end(&mut out),
            stderr.read_to_end(&mut err),
            child.wait(),
        );
        status
    };

    let waited = tokio::time::timeout(deadline, wait).await;
    match waited {
        Err(_) => {
            let _ = child.kill().await;
            debug!(%bin, captured = out.len(), "log command timed out");
            Err(LogError::Timeout {
                bin: bin.to_string(),
                partial: String::from_utf8_lossy(&out).into_owned(),
            })
        }
        Ok(Err(e)) => Err(LogError::Failed(format!("{bin}: {e}"))),
        Ok(Ok(status)) if !status.success() => {
            let msg = String::from_utf8_lossy(&err).trim().to_string();
            if msg.is_empty() {
                Err(LogError::Failed(format!("{bin} {status}")))
            } else {
                Err(LogError::Failed(msg))
            }
        }
        Ok(Ok(_)) => Ok(String::from_utf8_lossy(&out).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout() {
        let out = run_shell("printf 'a\\nb\\n'").await.unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[tokio::test]
    async fn nonzero_exit_surfaces_stderr() {
        let err = run_shell("echo oops >&2; exit 3").await.unwrap_err();
        match err {
            LogError::Failed(msg) => assert_eq!(msg, "oops"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nonzero_exit_with_silent_stderr_reports_status() {
        let err = run_shell("exit 4").await.unwrap_err();
        match err {
            LogError::Failed(msg) => assert!(msg.contains("4"), "got {msg:?}"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let err = run_command("/nonexistent/fleetcheck-bin", &[]).await.unwrap_err();
        assert!(matches!(err, LogError::Spawn { .. }));
    }

    #[tokio::test]
    async fn deadline_kills_child_and_keeps_partial_output() {
        let args = vec!["-c".to_string(), "echo partial; sleep 30".to_string()];
        let err = run_with_deadline("/bin/sh", &args, Duration::from_millis(300))
            .await
            .unwrap_err();
        match err {
            LogError::Timeout { bin, partial } => {
                assert_eq!(bin, "/bin/sh");
                assert_eq!(partial, "partial\n");
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }
}
