//! # Domain Availability Library
//!
//! A small library for checking whether a domain name is available for
//! registration, using the WhoisXMLAPI Domain Availability service.
//!
//! The library wraps a single upstream call: an HTTP GET carrying the API key
//! and the domain name, whose JSON response is normalized into a boolean
//! availability result. Errors are classified internally (network, timeout,
//! decode, unexpected shape, upstream status) but collapse to one generic
//! user-facing message at the outer boundary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_availability_lib::{AvailabilityChecker, CheckConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CheckConfig::new("my-api-key");
//!     let checker = AvailabilityChecker::new(config)?;
//!     let result = checker.check_domain("example.com").await?;
//!
//!     println!("Domain: {} - Available: {}", result.domain, result.available);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Injected configuration**: the API key is passed in, never read from the
//!   process environment inside the checker
//! - **Concurrent processing**: bounded parallel checks for multiple domains
//! - **One request per check**: no retries, no hidden fan-out

// Re-export main public API types and functions
// This makes them available as domain_availability_lib::TypeName
pub use checker::AvailabilityChecker;
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
};
pub use error::{AvailabilityError, GENERIC_CHECK_FAILURE};
pub use types::{AvailabilityResult, CheckConfig, DomainAvailability, ErrorPayload};

// Internal modules - these are not part of the public API
mod checker;
mod config;
mod error;
mod provider;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, AvailabilityError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default endpoint of the upstream Domain Availability API.
pub const DEFAULT_ENDPOINT: &str = "https://domain-availability.whoisxmlapi.com/api/v1";

/// Environment variable holding the upstream API key.
///
/// The key is read once at frontend startup and injected into [`CheckConfig`];
/// the library itself never touches the environment during a check.
pub const API_KEY_ENV_VAR: &str = "DOMAIN_API_KEY";
