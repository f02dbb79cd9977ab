//! fleetcheck.toml configuration document.
//!
//! The CLI loads this, applies defaults, and validates it eagerly — an
//! invalid agent or log backend never reaches the runner. The core
//! consumes the config as-is and assumes both steps already happened.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::types::{AgentSpec, ChecksConfig, LogBackend, LogsConfig};

/// Fallback HTTP timeout when none is configured.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Max agent checks in flight at once. 0 is normalized to 5.
    #[serde(default)]
    pub concurrency: u32,
    /// HTTP timeout as a duration string ("8s", "500ms", "2m").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_timeout: Option<String>,
    /// Accept self-signed / invalid TLS certificates.
    #[serde(default)]
    pub insecure_tls: bool,
    /// Tail length for agents that don't override it. 0 is normalized to 200.
    #[serde(default)]
    pub default_tail_lines: u32,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

impl Config {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Normalize zero/absent settings to their documented defaults.
    ///
    /// The runner relies on this having been called: it never re-checks.
    pub fn apply_defaults(&mut self) {
        if self.concurrency == 0 {
            self.concurrency = 5;
        }
        if self.http_timeout.as_deref().is_none_or(|s| s.trim().is_empty()) {
            self.http_timeout = Some("8s".to_string());
        }
        if self.default_tail_lines == 0 {
            self.default_tail_lines = 200;
        }
        for agent in &mut self.agents {
            if agent.api_version == 0 {
                agent.api_version = 1;
            }
        }
    }

    /// The resolved HTTP timeout.
    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
            .as_deref()
            .and_then(parse_duration)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT)
    }

    /// Reject configs the runner must never see: blank or duplicate agent
    /// names, blank base URLs, unparseable timeouts, and log backends with
    /// empty required fields.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(timeout) = self.http_timeout.as_deref() {
            if parse_duration(timeout).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "http_timeout {timeout:?} is not a duration (try \"8s\")"
                )));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(ConfigError::Invalid("agent name must not be empty".into()));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate agent name {:?}",
                    agent.name
                )));
            }
            if agent.base_url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "agent {:?} has an empty base_url",
                    agent.name
                )));
            }
            validate_backend(&agent.name, &agent.logs.backend)?;
        }
        Ok(())
    }

    /// A starter config written by `--write-config` when no file exists.
    pub fn scaffold() -> Self {
        Config {
            concurrency: 5,
            http_timeout: Some("8s".to_string()),
            insecure_tls: false,
            default_tail_lines: 200,
            agents: vec![AgentSpec {
                name: "agent-1".to_string(),
                base_url: "https://localhost:5678".to_string(),
                api_key: None,
                api_version: 1,
                checks: ChecksConfig::default(),
                logs: LogsConfig::default(),
            }],
        }
    }
}

fn validate_backend(agent: &str, backend: &LogBackend) -> ConfigResult<()> {
    let missing = |field: &str| {
        ConfigError::Invalid(format!(
            "agent {agent:?}: logs type {:?} requires a non-empty {field}",
            backend.kind()
        ))
    };
    match backend {
        LogBackend::None => {}
        LogBackend::File { path } => {
            if path.trim().is_empty() {
                return Err(missing("path"));
            }
        }
        LogBackend::Docker { container, .. } => {
            if container.trim().is_empty() {
                return Err(missing("container"));
            }
        }
        LogBackend::Command { cmd } => {
            if cmd.trim().is_empty() {
                return Err(missing("cmd"));
            }
        }
        LogBackend::Ssh { host, cmd, .. } => {
            if host.trim().is_empty() {
                return Err(missing("host"));
            }
            if cmd.trim().is_empty() {
                return Err(missing("cmd"));
            }
        }
    }
    Ok(())
}

/// Parse a duration string like "5s", "500ms", "1m". Bare numbers are
/// seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn agent(name: &str) -> AgentSpec {
        AgentSpec {
            name: name.to_string(),
            base_url: "https://host:5678".to_string(),
            api_key: None,
            api_version: 1,
            checks: ChecksConfig::default(),
            logs: LogsConfig::default(),
        }
    }

    #[test]
    fn defaults_fill_zero_values() {
        let mut config = Config {
            concurrency: 0,
            http_timeout: None,
            insecure_tls: false,
            default_tail_lines: 0,
            agents: vec![AgentSpec {
                api_version: 0,
                ..agent("a")
            }],
        };
        config.apply_defaults();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.http_timeout(), Duration::from_secs(8));
        assert_eq!(config.default_tail_lines, 200);
        assert_eq!(config.agents[0].api_version, 1);
    }

    #[test]
    fn defaults_leave_explicit_values() {
        let mut config = Config {
            concurrency: 12,
            http_timeout: Some("2s".to_string()),
            insecure_tls: true,
            default_tail_lines: 50,
            agents: vec![AgentSpec {
                api_version: 3,
                ..agent("a")
            }],
        };
        config.apply_defaults();
        assert_eq!(config.concurrency, 12);
        assert_eq!(config.http_timeout(), Duration::from_secs(2));
        assert_eq!(config.default_tail_lines, 50);
        assert_eq!(config.agents[0].api_version, 3);
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let config = Config {
            agents: vec![agent("a"), agent("a")],
            ..Config::scaffold()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_backend_fields() {
        for backend in [
            LogBackend::File { path: " ".to_string() },
            LogBackend::Docker {
                container: "".to_string(),
                args: vec![],
            },
            LogBackend::Command { cmd: "".to_string() },
            LogBackend::Ssh {
                host: "host".to_string(),
                cmd: "".to_string(),
                args: vec![],
            },
        ] {
            let mut a = agent("a");
            a.logs.backend = backend;
            let config = Config {
                agents: vec![a],
                ..Config::scaffold()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn validate_rejects_bad_timeout() {
        let config = Config {
            http_timeout: Some("soon".to_string()),
            ..Config::scaffold()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn scaffold_round_trips_through_toml() {
        let config = Config::scaffold();
        let toml = config.to_toml_string().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn from_file_parses_a_full_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
concurrency = 3
http_timeout = "2s"
insecure_tls = true
default_tail_lines = 100

[[agents]]
name = "prod"
base_url = "https://n8n.internal:5678"
api_key = "secret"
api_version = 1

[agents.checks]
healthz = true
readiness = true
metrics = true
api = true

[agents.logs]
tail_lines = 50

[agents.logs.backend]
type = "ssh"
host = "ops@n8n.internal"
cmd = "docker logs --tail 50 n8n"
args = ["-p", "2222"]
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.concurrency, 3);
        assert!(config.insecure_tls);
        let a = &config.agents[0];
        assert_eq!(a.api_key.as_deref(), Some("secret"));
        assert!(a.checks.metrics);
        assert_eq!(a.logs.tail_lines, 50);
        assert_eq!(a.logs.backend.kind(), "ssh");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("8s"), Some(Duration::from_secs(8)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("10"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("fast"), None);
    }
}
