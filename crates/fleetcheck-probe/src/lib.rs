//! fleetcheck-probe — HTTP probing for one agent.
//!
//! Issues the enabled endpoint checks sequentially against an agent's base
//! URL and classifies each response. Concurrency happens across agents in
//! the runner, never inside one agent.
//!
//! ```text
//! probe_agent()
//!   ├── resolve() — slash-normalizing URL join
//!   ├── probe_url() — GET + classify → EndpointProbe
//!   └── notes: 404 "likely not enabled", missing api_key skip
//! ```

pub mod client;
pub mod prober;

pub use client::build_client;
pub use prober::{probe_agent, probe_url, resolve, status_ok};
