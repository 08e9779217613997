//! Per-host probing: one forged-origin GET per scheme

use crate::error::Result;
use crate::http::ProbeClient;
use crate::models::{
    ProbeOutcome, ResponseSnapshot, ScanRecord, Scheme, EVIL_ORIGIN_DOMAIN,
};
use crate::scanner::cors;
use tracing::{debug, warn};
use url::Url;

/// Probes single hosts with a forged `Origin` header
#[derive(Clone)]
pub struct SiteProber {
    client: ProbeClient,
}

impl SiteProber {
    pub fn new(client: ProbeClient) -> Self {
        Self { client }
    }

    /// Scans one host over http and https and combines the outcomes into
    /// a single record. Never fails: degraded probes contribute a
    /// non-vulnerable outcome with an empty payload.
    pub async fn scan_host(&self, host: &str) -> ScanRecord {
        // The two schemes are independent and OR-combined, so they run
        // concurrently.
        let (http, https) = tokio::join!(
            self.probe(Scheme::Http, host),
            self.probe(Scheme::Https, host)
        );

        ScanRecord {
            host: host.to_string(),
            vulnerable: http.vulnerable || https.vulnerable,
            http_result: http.raw,
            https_result: https.raw,
        }
    }

    /// Issues one GET against `scheme://host`. URL construction and
    /// transport errors are logged and degrade to a failed outcome.
    pub async fn probe(&self, scheme: Scheme, host: &str) -> ProbeOutcome {
        match self.try_probe(scheme, host).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Probe {scheme}://{host} failed: {e}");
                ProbeOutcome::failed()
            }
        }
    }

    async fn try_probe(&self, scheme: Scheme, host: &str) -> Result<ProbeOutcome> {
        let target = Url::parse(&format!("{scheme}://{host}"))?;
        let origin = format!("{scheme}://{host}.{EVIL_ORIGIN_DOMAIN}");

        let response = self.client.get_with_origin(target, &origin).await?;

        let vulnerable = cors::is_vulnerable(response.headers());
        debug!(
            "{} responded {} (vulnerable: {vulnerable})",
            response.url(),
            response.status()
        );

        let raw = match serde_json::to_string(&ResponseSnapshot::of(&response)) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not serialize response from {scheme}://{host}: {e}");
                String::new()
            }
        };

        Ok(ProbeOutcome { vulnerable, raw })
    }
}
