// # HTTP IP Source
//
// This crate provides the public IP lookup for the DDNS client.
//
// ## Architecture
//
// Asks an external "what is my IP" service (e.g., ipinfo.io, api.ipify.org)
// for the address this host is seen from. The service answers with the
// address as plain text.
//
// Every call to `current()` is a live request: nothing is cached and nothing
// is retried. A failed lookup ends the run; the scheduler's next tick is the
// retry.

use ddns_core::traits::IpSource;
use ddns_core::{Error, PublicIp, Result};

use std::time::Duration;

/// Default lookup service
pub const DEFAULT_LOOKUP_URL: &str = "https://ipinfo.io/ip";

/// Default HTTP timeout for lookup requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP-based public IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://ipinfo.io/ip")
    /// - `timeout`: Upper bound for the whole request
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create a source for the default lookup service
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_LOOKUP_URL, DEFAULT_HTTP_TIMEOUT)
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<PublicIp> {
        tracing::debug!("Requesting public IP from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("IP lookup request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::error!("Unable to fetch the current public IP: {}", response.status());
            return Err(Error::network(format!(
                "IP lookup returned HTTP {}",
                response.status()
            )));
        }

        let ip_text = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read IP lookup response: {}", e)))?;

        // Services disagree on trailing newlines; the address itself is opaque
        let ip_text = ip_text.trim();
        if ip_text.is_empty() {
            return Err(Error::network("IP lookup returned an empty body"));
        }

        Ok(PublicIp::new(ip_text))
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
