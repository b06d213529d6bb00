// # FreeDNS Provider
//
// This crate provides a FreeDNS (freedns.afraid.org) provider for the DDNS client.
//
// ## How FreeDNS Updates Work
//
// FreeDNS does not take the new address in an API payload. Instead every
// dynamic record has a secret update URL; requesting it makes FreeDNS set
// the record to the address the request came from.
//
// 1. Derive the account token: `sha1("{username}|{password}")`, lowercase hex
// 2. List the account's dynamic records:
//    `GET /api/?action=getdyndns&v=2&sha=<token>`
//    → one `domain|current_ip|update_url` line per record
// 3. Pick one record (see record selection below)
// 4. `GET <update_url>` and classify the text response
//
// ## Record Selection
//
// - Zero records → `Error::NoDomainsFound`
// - One record → used as-is, any domain hint is ignored
// - Several records, no hint → `Error::MissingDomainHint`
// - Several records, hint → the FIRST record containing the hint;
//   none → `Error::DomainNotFound`
//
// ## Security Requirements
//
// - The token and update URLs are credentials: never logged
// - Only the domain part of a record appears in logs
//
// ## Architectural Constraints
//
// - ✅ One listing request and one update request per call
// - ❌ NO retry logic (the next scheduled run retries)
// - ❌ NO state between calls (credentials arrive with every call)

use async_trait::async_trait;
use ddns_core::traits::{DnsProvider, UpdateResult};
use ddns_core::{Credentials, Error, PublicIp, Result};
use sha1::{Digest, Sha1};
use std::time::Duration;

/// FreeDNS API endpoint
pub const FREEDNS_API_BASE: &str = "https://freedns.afraid.org/api/";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Derive the FreeDNS API token from account credentials
///
/// This is FreeDNS's own scheme: one unsalted SHA-1 pass over
/// `"{username}|{password}"`, hex encoded. It authenticates against their
/// API and nothing else.
pub fn api_token(credentials: &Credentials) -> String {
    let joined = format!("{}|{}", credentials.username, credentials.password);
    hex::encode(Sha1::digest(joined.as_bytes()))
}

/// Split a `getdyndns` response into records, dropping blank lines
pub fn parse_records(body: &str) -> Vec<&str> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Pick the record to update
///
/// With several records, the first one whose text contains `domain_hint`
/// wins.
pub fn select_record<'a>(records: &[&'a str], domain_hint: Option<&str>) -> Result<&'a str> {
    match records {
        [] => Err(Error::NoDomainsFound),
        [only] => Ok(*only),
        _ => {
            let hint = domain_hint.ok_or(Error::MissingDomainHint {
                count: records.len(),
            })?;
            records
                .iter()
                .find(|record| record.contains(hint))
                .copied()
                .ok_or_else(|| Error::domain_not_found(hint))
        }
    }
}

/// Extract the update URL: the text after the last `|`
pub fn update_url(record: &str) -> Result<&str> {
    let url = record.rsplit('|').next().unwrap_or(record).trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Error::provider(
            "freedns",
            format!("Record for {} carries no update URL", record_domain(record)),
        ));
    }
    Ok(url)
}

/// Network error for a failed request
///
/// The URL is stripped: it carries the account token or a record's update key.
fn request_error(context: &str, e: reqwest::Error) -> Error {
    Error::network(format!("{}: {}", context, e.without_url()))
}

/// The domain part of a record, safe to log
fn record_domain(record: &str) -> &str {
    record.split('|').next().unwrap_or_default()
}

/// Classify the text FreeDNS sends back from an update URL
///
/// Known answers:
/// - `Updated 1 host(s) home.example.com to 1.2.3.4 in 0.2 seconds`
/// - `ERROR: Address 1.2.3.4 has not changed.`
/// - `ERROR: ...` for everything that went wrong
pub fn classify_response(body: &str) -> Result<UpdateResult> {
    let message = body.trim().to_string();

    if message.starts_with("Updated") {
        Ok(UpdateResult::Updated { message })
    } else if message.contains("has not changed") {
        Ok(UpdateResult::Unchanged { message })
    } else if message.starts_with("ERROR") {
        Err(Error::provider("freedns", message))
    } else {
        Ok(UpdateResult::Unrecognized { message })
    }
}

/// FreeDNS dynamic DNS provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - List the account's records and select one
/// - **NOT** request the update URL
pub struct FreeDnsProvider {
    /// API endpoint (overridable for testing)
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: list and select, but skip the update request
    dry_run: bool,
}

impl std::fmt::Debug for FreeDnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeDnsProvider")
            .field("api_base", &self.api_base)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl FreeDnsProvider {
    /// Create a new FreeDNS provider
    ///
    /// # Parameters
    ///
    /// - `api_base`: FreeDNS API endpoint, normally [`FREEDNS_API_BASE`]
    /// - `timeout`: Upper bound for each request
    /// - `dry_run`: If true, skip the update request
    pub fn new(api_base: impl Into<String>, timeout: Duration, dry_run: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: api_base.into(),
            client,
            dry_run,
        })
    }

    /// Create a live provider for the public FreeDNS API
    pub fn with_defaults() -> Result<Self> {
        Self::new(FREEDNS_API_BASE, DEFAULT_HTTP_TIMEOUT, false)
    }

    /// Whether this provider skips the update request
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Fetch the raw `getdyndns` listing
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /api/?action=getdyndns&v=2&sha=<token>
    /// ```
    async fn list_records(&self, token: &str) -> Result<String> {
        tracing::debug!("Listing FreeDNS dynamic records");

        let response = self
            .client
            .get(&self.api_base)
            .query(&[("action", "getdyndns"), ("v", "2"), ("sha", token)])
            .send()
            .await
            .map_err(|e| request_error("FreeDNS listing request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return match status.as_u16() {
                401 | 403 => Err(Error::auth(format!(
                    "FreeDNS rejected the account token. Status: {}",
                    status
                ))),
                _ => Err(Error::network(format!(
                    "FreeDNS listing returned HTTP {}",
                    status
                ))),
            };
        }

        let body = response
            .text()
            .await
            .map_err(|e| request_error("Failed to read FreeDNS listing", e))?;

        // FreeDNS reports bad credentials in-band with a 200
        if body.trim_start().starts_with("ERROR") {
            let first_line = body.trim().lines().next().unwrap_or_default();
            return Err(Error::auth(first_line.to_string()));
        }

        Ok(body)
    }

    /// Request the update URL
    async fn request_update(&self, url: &str) -> Result<UpdateResult> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error("FreeDNS update request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "FreeDNS update returned HTTP {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| request_error("Failed to read FreeDNS update response", e))?;

        tracing::info!("{}", body.trim());
        classify_response(&body)
    }
}

#[async_trait]
impl DnsProvider for FreeDnsProvider {
    async fn push_update(
        &self,
        credentials: &Credentials,
        domain_hint: Option<&str>,
        new_ip: &PublicIp,
    ) -> Result<UpdateResult> {
        let token = api_token(credentials);

        let body = self.list_records(&token).await?;
        let records = parse_records(&body);
        tracing::debug!("FreeDNS returned {} record(s)", records.len());

        let record = select_record(&records, domain_hint).inspect_err(|e| match e {
            Error::MissingDomainHint { .. } => tracing::error!(
                "You have multiple FreeDNS domains, the `domain` setting is required."
            ),
            Error::DomainNotFound { domain } => tracing::error!(
                "The provided domain {} is not found in your list of FreeDNS domains.",
                domain
            ),
            _ => tracing::error!("No FreeDNS domains found."),
        })?;
        let url = update_url(record)?;

        tracing::info!(
            "Updating FreeDNS record: {} -> {} [mode: {}]",
            record_domain(record),
            new_ip,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would request the update URL for {}",
                record_domain(record)
            );
            return Ok(UpdateResult::DryRun {
                update_url: url.to_string(),
            });
        }

        self.request_update(url).await
    }

    fn provider_name(&self) -> &'static str {
        "freedns"
    }
}
