//! Configuration model loaded from external sources.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the API client and the command line front-end.
pub struct ClientConfig {
    /// Base URL of the clinic API, e.g. `http://localhost:3000/api`.
    pub api_base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// JSON file holding the signed-in session between invocations.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_page_size() -> usize {
    crate::pagination::DEFAULT_PAGE_SIZE
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".vet-clinic-session.json")
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
