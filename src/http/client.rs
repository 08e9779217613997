//! HTTP client wrapper for forged-origin probing

use crate::error::{NarcissusError, Result};
use reqwest::header::{HeaderValue, LOCATION, ORIGIN};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Maximum redirect hops a single probe will follow
const MAX_REDIRECTS: usize = 10;

/// Thin reqwest wrapper that keeps a forged `Origin` header alive across
/// redirects.
///
/// reqwest's built-in redirect policy cannot rewrite request headers per
/// hop, so redirects are disabled on the inner client and followed here,
/// re-applying the `Origin` header before each hop is sent.
#[derive(Clone)]
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// Builds a probing client. Certificate validation is disabled: a
    /// host behind a self-signed or expired certificate can still
    /// reflect origins, and that behavior is what the scan is after.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { client })
    }

    /// Sends a GET with the given `Origin` header, following up to
    /// MAX_REDIRECTS hops manually so every hop carries the header.
    pub async fn get_with_origin(&self, url: Url, origin: &str) -> Result<Response> {
        let origin_value = HeaderValue::from_str(origin).map_err(|e| {
            NarcissusError::ScanError(format!("invalid Origin value {origin:?}: {e}"))
        })?;

        let mut url = url;
        for _ in 0..=MAX_REDIRECTS {
            let response = self
                .client
                .get(url.clone())
                .header(ORIGIN, origin_value.clone())
                .send()
                .await?;

            if !response.status().is_redirection() {
                return Ok(response);
            }

            // A redirect status without a usable Location is the final
            // response as far as the probe is concerned.
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let Some(location) = location else {
                return Ok(response);
            };

            let next = url.join(&location)?;
            debug!("Following redirect {url} -> {next}");
            url = next;
        }

        Err(NarcissusError::TooManyRedirects(url.to_string()))
    }
}
