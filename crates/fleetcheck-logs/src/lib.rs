//! fleetcheck-logs — log retrieval for monitored agents.
//!
//! Four backends behind one dispatch point:
//!
//! ```text
//! fetch(backend, tail_lines)
//!   ├── File    → tail_file() — reverse-chunk tailer
//!   ├── Docker  → docker logs --tail N <args> <container>
//!   ├── Command → /bin/sh -c <cmd>
//!   └── Ssh     → ssh <args> <host> <cmd>
//! ```
//!
//! Every external process is bounded by a 15 s deadline; on expiry the
//! child is killed and whatever stdout it produced is preserved on the
//! timeout error.

pub mod exec;
pub mod source;
pub mod summary;
pub mod tail;

pub use exec::{run_command, run_shell, EXEC_TIMEOUT};
pub use source::fetch;
pub use summary::summarize;
pub use tail::tail_file;
