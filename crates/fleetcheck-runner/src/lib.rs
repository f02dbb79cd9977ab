//! fleetcheck-runner — one complete check pass over the fleet.
//!
//! ```text
//! run_checks(config)
//!   ├── shared reqwest client (timeout, TLS setting)
//!   ├── Semaphore(concurrency) gates task start
//!   ├── one task per agent: check_agent()
//!   │     ├── probe_agent() — HTTP checks
//!   │     └── fetch() + summarize() — log tail
//!   ├── Mutex<Vec<AgentReport>> — append only, lock held briefly
//!   └── join barrier, then sort by agent name
//! ```
//!
//! Anything that goes wrong inside one agent's task lands in that agent's
//! report; sibling agents are never affected. Output order is always
//! ascending by name regardless of completion timing.

pub mod runner;

pub use runner::{check_agent, run_checks, RunnerError};
