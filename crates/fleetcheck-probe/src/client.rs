//! Shared HTTP client construction.

use std::time::Duration;

/// Build the client shared read-only across all concurrent probes.
///
/// `insecure_tls` disables certificate verification for fleets running on
/// self-signed certs.
pub fn build_client(timeout: Duration, insecure_tls: bool) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(insecure_tls)
        .build()
}
