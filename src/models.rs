//! Core data models for the Narcissus scanner

use crate::error::{NarcissusError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Fixed per-request timeout. Applies to every probe; there is no
/// overall run deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Marker domain appended to the probed host to forge the attacker
/// origin. A response echoing this domain back in
/// `Access-Control-Allow-Origin` is reflecting attacker input.
pub const EVIL_ORIGIN_DOMAIN: &str = "myevilsite.com";

/// URL scheme a single probe runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// Outcome of a single (host, scheme) probe
#[derive(Debug, Clone, Default)]
pub struct ProbeOutcome {
    /// Whether the response granted the forged origin credentialed access
    pub vulnerable: bool,
    /// Serialized response metadata, empty when the probe failed
    pub raw: String,
}

impl ProbeOutcome {
    /// Degraded outcome for a probe that never produced a usable response
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Serializable view of a probe response: status, headers in wire order,
/// and the final URL after redirects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl ResponseSnapshot {
    /// Captures the metadata of a probe response
    pub fn of(response: &reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            url: response.url().to_string(),
            headers: response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        }
    }
}

/// One record per scanned host, emitted to the result sink
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRecord {
    /// Hostname exactly as it appeared in the input stream
    pub host: String,
    /// True when either scheme's probe found the reflection
    pub vulnerable: bool,
    /// Raw http probe payload, empty on failure
    pub http_result: String,
    /// Raw https probe payload, empty on failure
    pub https_result: String,
}

/// Configuration for a scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of concurrent workers; also the queue capacity
    pub workers: usize,
    /// Hostname list files, consumed in order
    pub sites: Vec<PathBuf>,
    /// User-Agent header value
    pub user_agent: String,
}

impl ScanConfig {
    /// Checks the invariants a run depends on
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(NarcissusError::ConfigError(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.sites.is_empty() {
            return Err(NarcissusError::ConfigError(
                "at least one sites file is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            sites: Vec::new(),
            user_agent: "Narcissus-Scanner/0.1.0".to_string(),
        }
    }
}

/// End-of-run statistics, reported on stderr
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Scan start time (local timezone)
    pub started_at: DateTime<Local>,
    /// Scan end time (local timezone)
    pub finished_at: DateTime<Local>,
    /// Hosts pulled from the stream and scanned
    pub hosts_scanned: u64,
    /// Hosts flagged on at least one scheme
    pub vulnerable: u64,
}
