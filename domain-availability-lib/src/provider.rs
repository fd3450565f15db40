//! Upstream provider client for the Domain Availability API.
//!
//! This module owns the single outbound HTTP call of the whole system: a GET
//! to the WhoisXMLAPI Domain Availability endpoint with the API key and the
//! domain as query parameters, and the parsing of its JSON response.

use crate::error::AvailabilityError;
use crate::types::{AvailabilityResult, CheckConfig, DomainAvailability};
use std::time::{Duration, Instant};
use tracing::debug;

/// HTTP client for the upstream availability endpoint.
///
/// All request construction, timeout handling and response parsing lives
/// here. Exactly one request goes out per check: there is no retry, even on
/// 429 or 5xx answers.
#[derive(Clone)]
pub struct ProviderClient {
    /// HTTP client for upstream requests
    http_client: reqwest::Client,
    /// Base URL of the upstream endpoint
    endpoint: String,
    /// API key sent with every request
    api_key: String,
    /// Timeout for each upstream call
    timeout: Duration,
}

impl ProviderClient {
    /// Create a provider client from an injected configuration.
    pub fn from_config(config: &CheckConfig) -> Result<Self, AvailabilityError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                AvailabilityError::network_with_source(
                    "Failed to create upstream HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    /// Check domain availability against the upstream API.
    ///
    /// The domain string is forwarded as-is in the `domainName` query
    /// parameter (the HTTP client percent-encodes it for transport) and
    /// echoed verbatim in the result.
    ///
    /// # Errors
    ///
    /// Returns `AvailabilityError` if:
    /// - The request fails at the network level or times out
    /// - The upstream answers with a non-success status
    /// - The body is not JSON or lacks `DomainInfo.domainAvailability`
    pub async fn check_domain(&self, domain: &str) -> Result<AvailabilityResult, AvailabilityError> {
        let start_time = Instant::now();

        let result =
            tokio::time::timeout(self.timeout, self.make_availability_request(domain)).await;

        let check_duration = start_time.elapsed();

        match result {
            Ok(Ok(status)) => {
                debug!(domain, %status, ?check_duration, "upstream check completed");
                Ok(AvailabilityResult::new(domain, status).with_duration(check_duration))
            }
            Ok(Err(e)) => {
                debug!(domain, error = %e, "upstream check failed");
                Err(e)
            }
            Err(_) => Err(AvailabilityError::timeout(
                "availability request",
                self.timeout,
            )),
        }
    }

    /// Issue the single GET request and parse the upstream answer.
    async fn make_availability_request(
        &self,
        domain: &str,
    ) -> Result<DomainAvailability, AvailabilityError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("apiKey", self.api_key.as_str()), ("domainName", domain)])
            .send()
            .await
            .map_err(AvailabilityError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AvailabilityError::upstream_with_status(
                domain,
                format!("upstream returned {}", status),
                status.as_u16(),
            ));
        }

        let json = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AvailabilityError::decode(format!("Failed to parse JSON: {}", e)))?;

        extract_availability(domain, &json)
    }
}

/// Extract the `DomainInfo.domainAvailability` string from an upstream body.
///
/// A missing `DomainInfo` object, a missing field, or a non-string value are
/// all unexpected-shape errors rather than a silent `false` — the loose
/// string comparison happens only on an actual string.
fn extract_availability(
    domain: &str,
    json: &serde_json::Value,
) -> Result<DomainAvailability, AvailabilityError> {
    let domain_info = json.get("DomainInfo").ok_or_else(|| {
        AvailabilityError::unexpected_shape(domain, "missing 'DomainInfo' object")
    })?;

    let raw = domain_info.get("domainAvailability").ok_or_else(|| {
        AvailabilityError::unexpected_shape(domain, "missing 'domainAvailability' field")
    })?;

    match raw.as_str() {
        Some(value) => Ok(DomainAvailability::parse(value)),
        None => Err(AvailabilityError::unexpected_shape(
            domain,
            format!("'domainAvailability' is not a string: {}", raw),
        )),
    }
}
