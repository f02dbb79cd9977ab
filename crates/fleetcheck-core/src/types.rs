//! Domain types for the fleet checker.
//!
//! These types describe one monitored agent (its address, enabled checks,
//! and log source) and the health report produced for it. Reports are
//! serializable to JSON for the structured output mode.

use serde::{Deserialize, Serialize};

/// Which HTTP endpoints to probe on an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecksConfig {
    /// Probe `/healthz`.
    #[serde(default = "default_true")]
    pub healthz: bool,
    /// Probe `/healthz/readiness`.
    #[serde(default = "default_true")]
    pub readiness: bool,
    /// Probe `/metrics`.
    #[serde(default)]
    pub metrics: bool,
    /// Probe the versioned API (requires an api_key).
    #[serde(default)]
    pub api: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            healthz: true,
            readiness: true,
            metrics: false,
            api: false,
        }
    }
}

/// Where an agent's logs come from.
///
/// Exactly one backend is active per agent; adding a variant without
/// handling it in the log fetcher is a compile error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogBackend {
    /// No log retrieval for this agent.
    #[default]
    None,
    /// Tail a local file.
    File { path: String },
    /// `docker logs` against a named container.
    Docker {
        container: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
    /// An arbitrary local command run through the shell.
    Command { cmd: String },
    /// A remote command over ssh.
    Ssh {
        host: String,
        cmd: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
}

impl LogBackend {
    /// Stable lowercase name for error messages and notes.
    pub fn kind(&self) -> &'static str {
        match self {
            LogBackend::None => "none",
            LogBackend::File { .. } => "file",
            LogBackend::Docker { .. } => "docker",
            LogBackend::Command { .. } => "command",
            LogBackend::Ssh { .. } => "ssh",
        }
    }
}

/// Log retrieval configuration for one agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsConfig {
    /// How many lines to tail. 0 means use the global default.
    #[serde(default)]
    pub tail_lines: u32,
    #[serde(default)]
    pub backend: LogBackend,
}

/// One monitored service instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSpec {
    /// Unique user-facing label; reports are sorted by this.
    pub name: String,
    /// Base address, e.g. `https://host:5678`.
    pub base_url: String,
    /// Credential forwarded on the API check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API path version. 0 is normalized to 1 by `Config::apply_defaults`.
    #[serde(default)]
    pub api_version: u32,
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

/// Outcome of a single HTTP probe against one endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointProbe {
    pub url: String,
    /// True for 2xx or 304.
    pub ok: bool,
    /// HTTP status, or 0 when the request never produced a response.
    pub status: u16,
    pub duration_ms: u64,
    /// Transport-level failure text (DNS, connect, timeout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Up to 160 chars taken from the first 512 bytes of the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_hint: Option<String>,
}

/// The per-agent health report produced by one check pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentReport {
    pub name: String,
    pub base_url: String,
    /// Aggregate verdict; see [`AgentReport::compute_working`].
    pub working: bool,
    /// Unix timestamp (seconds) when the check started.
    pub checked_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthz: Option<EndpointProbe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness: Option<EndpointProbe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<EndpointProbe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<EndpointProbe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_tail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl AgentReport {
    /// An empty report for one agent, stamped with the current time.
    pub fn new(name: &str, base_url: &str, checked_at: u64) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            working: false,
            checked_at,
            healthz: None,
            readiness: None,
            metrics: None,
            api: None,
            log_tail: None,
            log_summary: None,
            notes: Vec::new(),
        }
    }

    /// Whether the agent counts as working: any of readiness, healthz, or
    /// api present and ok. Metrics never contributes.
    pub fn compute_working(&self) -> bool {
        [&self.readiness, &self.healthz, &self.api]
            .into_iter()
            .any(|p| p.as_ref().is_some_and(|r| r.ok))
    }
}
