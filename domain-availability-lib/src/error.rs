//! Error handling for availability lookups.
//!
//! The upstream call can fail in several distinguishable ways (network,
//! timeout, decode, unexpected shape, non-success status). Each gets its own
//! variant so frontends can log precisely, but all of them collapse to one
//! generic localized message at the outer boundary via [`AvailabilityError::user_message`].

use std::fmt;

/// The single user-facing failure message.
///
/// Kept byte-for-byte identical across every error variant: callers of the
/// public endpoint must not be able to distinguish a network failure from a
/// malformed upstream body.
pub const GENERIC_CHECK_FAILURE: &str = "Impossible de vérifier la disponibilité du domaine.";

/// Main error type for availability lookups.
#[derive(Debug, Clone)]
pub enum AvailabilityError {
    /// Network-related errors (connection refused, DNS, TLS, etc.)
    Network {
        message: String,
        source: Option<String>,
    },

    /// The upstream call exceeded the configured timeout.
    ///
    /// The duration is `None` when the timeout was raised below the layer
    /// that knows the configured value.
    Timeout {
        operation: String,
        duration: Option<std::time::Duration>,
    },

    /// The upstream API answered with a non-success HTTP status
    Upstream {
        domain: String,
        message: String,
        status_code: Option<u16>,
    },

    /// The response body was not valid JSON
    Decode {
        message: String,
    },

    /// The response was valid JSON but did not contain the expected
    /// `DomainInfo.domainAvailability` string
    UnexpectedShape {
        domain: String,
        message: String,
    },

    /// Configuration errors (missing API key, invalid settings, etc.)
    Config {
        message: String,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl AvailabilityError {
    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new timeout error with the configured duration.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration: Some(duration),
        }
    }

    /// Create a new upstream error.
    pub fn upstream<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Upstream {
            domain: domain.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a new upstream error with HTTP status code.
    pub fn upstream_with_status<D: Into<String>, M: Into<String>>(
        domain: D,
        message: M,
        status_code: u16,
    ) -> Self {
        Self::Upstream {
            domain: domain.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new decode error.
    pub fn decode<M: Into<String>>(message: M) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new unexpected-shape error.
    pub fn unexpected_shape<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::UnexpectedShape {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The generic localized message shown to end users.
    ///
    /// Identical for every variant. The detailed `Display` output is for
    /// logs only and must never reach the public endpoint.
    pub fn user_message(&self) -> &'static str {
        GENERIC_CHECK_FAILURE
    }
}

impl fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Timeout {
                operation,
                duration,
            } => match duration {
                Some(duration) => {
                    write!(f, "Timeout after {:?} during: {}", duration, operation)
                }
                None => write!(f, "Timeout during: {}", operation),
            },
            Self::Upstream {
                domain,
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "Upstream error for '{}' (HTTP {}): {}", domain, code, message)
                } else {
                    write!(f, "Upstream error for '{}': {}", domain, message)
                }
            }
            Self::Decode { message } => {
                write!(f, "Decode error: {}", message)
            }
            Self::UnexpectedShape { domain, message } => {
                write!(f, "Unexpected response shape for '{}': {}", domain, message)
            }
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for AvailabilityError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for AvailabilityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // The configured duration lives in ProviderClient, not here
            Self::Timeout {
                operation: "HTTP request".to_string(),
                duration: None,
            }
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for AvailabilityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for AvailabilityError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_user_message_identical_for_all_variants() {
        let errors = vec![
            AvailabilityError::network("connection refused"),
            AvailabilityError::timeout("HTTP request", Duration::from_secs(5)),
            AvailabilityError::upstream_with_status("example.com", "server error", 500),
            AvailabilityError::decode("not json"),
            AvailabilityError::unexpected_shape("example.com", "missing DomainInfo"),
            AvailabilityError::config("missing API key"),
            AvailabilityError::internal("oops"),
        ];

        for err in errors {
            assert_eq!(err.user_message(), GENERIC_CHECK_FAILURE);
        }
    }

    #[test]
    fn test_display_contains_context() {
        let err = AvailabilityError::upstream_with_status("example.com", "server error", 502);
        let msg = err.to_string();
        assert!(msg.contains("example.com"));
        assert!(msg.contains("502"));

        let err = AvailabilityError::network_with_source("Connection failed", "refused");
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_timeout_display_reports_configured_duration() {
        let err = AvailabilityError::timeout("availability request", Duration::from_millis(250));
        assert!(err.to_string().contains("250ms"));

        // A timeout raised without access to the configuration must not
        // invent a duration
        let err = AvailabilityError::Timeout {
            operation: "HTTP request".to_string(),
            duration: None,
        };
        assert_eq!(err.to_string(), "Timeout during: HTTP request");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AvailabilityError = parse_err.into();
        assert!(matches!(err, AvailabilityError::Decode { .. }));
    }
}
