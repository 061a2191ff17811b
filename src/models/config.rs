//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the collector API serving the order plan dataset.
    pub api_base_url: String,
    /// Upper bound on any single collector request, in seconds.
    pub api_timeout_secs: u64,
    pub templates_dir: String,
    /// Signing key for the flash message cookie; at least 64 bytes.
    pub secret: String,
}
