//! Core data types for domain availability lookups.
//!
//! This module defines the result and configuration structures used
//! throughout the library, including the exact wire payloads relayed to
//! callers of the public endpoint.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::GENERIC_CHECK_FAILURE;

/// Registration state reported by the upstream API.
///
/// The upstream `DomainInfo.domainAvailability` field is documented to carry
/// `AVAILABLE` or `UNAVAILABLE`, but other states have been observed in the
/// wild. Anything that is not literally `AVAILABLE` reports as not available
/// on the wire; the raw status is kept so frontends can display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainAvailability {
    /// Upstream reported the literal string `AVAILABLE`
    Available,
    /// Upstream reported the literal string `UNAVAILABLE`
    Unavailable,
    /// Any other status string (e.g. an undetermined state), kept verbatim
    Undetermined(String),
}

impl DomainAvailability {
    /// Parse the upstream status string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "AVAILABLE" => Self::Available,
            "UNAVAILABLE" => Self::Unavailable,
            other => Self::Undetermined(other.to_string()),
        }
    }

    /// Whether this state maps to `available == true` on the wire.
    ///
    /// Strict equality with `AVAILABLE`: undetermined states report `false`,
    /// matching the upstream contract this service has always exposed.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl std::fmt::Display for DomainAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::Undetermined(raw) => write!(f, "{}", raw),
        }
    }
}

/// Result of a domain availability check.
///
/// Serializes to exactly `{"domain": ..., "available": ...}` — the upstream
/// status and timing are internal metadata and never reach the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// The domain name that was checked, echoed verbatim from the input
    pub domain: String,

    /// Whether the domain is available for registration
    pub available: bool,

    /// Raw upstream registration state behind the boolean
    #[serde(skip, default = "unknown_status")]
    pub status: DomainAvailability,

    /// How long the upstream call took
    #[serde(skip)]
    pub check_duration: Option<Duration>,
}

fn unknown_status() -> DomainAvailability {
    DomainAvailability::Undetermined(String::new())
}

impl AvailabilityResult {
    /// Build a result from the echoed domain and the parsed upstream state.
    pub fn new(domain: impl Into<String>, status: DomainAvailability) -> Self {
        Self {
            domain: domain.into(),
            available: status.is_available(),
            status,
            check_duration: None,
        }
    }

    /// Attach the duration of the upstream call.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.check_duration = Some(duration);
        self
    }
}

/// The single failure payload relayed to callers.
///
/// Every failure mode — network, timeout, decode, shape — produces this same
/// body, deliberately indistinguishable from the outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    /// The generic localized failure payload.
    pub fn generic() -> Self {
        Self {
            error: GENERIC_CHECK_FAILURE.to_string(),
        }
    }
}

/// Configuration for availability checks.
///
/// The API key is injected here by the frontend; the library never reads the
/// process environment during a check.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Upstream API key, sent as the `apiKey` query parameter
    pub api_key: String,

    /// Base URL of the upstream availability endpoint.
    /// Default: the production WhoisXMLAPI v1 endpoint
    pub endpoint: String,

    /// Timeout for each upstream call
    /// Default: 5 seconds
    pub timeout: Duration,

    /// Maximum number of concurrent checks when processing multiple domains
    /// Default: 10, Range: 1-100
    pub concurrency: usize,
}

impl CheckConfig {
    /// Create a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: crate::DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(5),
            concurrency: 10,
        }
    }

    /// Override the upstream endpoint (used by tests and self-hosted proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a custom timeout for upstream calls.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set custom concurrency for multi-domain checks.
    ///
    /// Automatically caps concurrency at 100 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }
}
