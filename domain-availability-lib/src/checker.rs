//! Main availability checker implementation.
//!
//! This module provides the primary `AvailabilityChecker` struct that
//! frontends hold: it owns the provider client and adds bounded-concurrency
//! handling for multi-domain runs.

use crate::error::AvailabilityError;
use crate::provider::ProviderClient;
use crate::types::{AvailabilityResult, CheckConfig};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;

/// Availability checker that coordinates upstream lookups.
///
/// # Example
///
/// ```rust,no_run
/// use domain_availability_lib::{AvailabilityChecker, CheckConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = AvailabilityChecker::new(CheckConfig::new("my-api-key"))?;
///     let result = checker.check_domain("example.com").await?;
///     println!("Available: {}", result.available);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AvailabilityChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Client for the upstream availability API
    provider: ProviderClient,
}

impl AvailabilityChecker {
    /// Create a checker from an injected configuration.
    ///
    /// The API key lives inside the configuration; nothing is read from the
    /// process environment here.
    pub fn new(config: CheckConfig) -> Result<Self, AvailabilityError> {
        let provider = ProviderClient::from_config(&config)?;
        Ok(Self { config, provider })
    }

    /// Check availability of a single domain.
    ///
    /// The domain string is forwarded to the upstream API as-is and echoed
    /// verbatim in the result. Exactly one upstream request is made.
    ///
    /// # Errors
    ///
    /// Returns `AvailabilityError` if the upstream call fails at any stage;
    /// use [`AvailabilityError::user_message`] at the outer boundary.
    pub async fn check_domain(&self, domain: &str) -> Result<AvailabilityResult, AvailabilityError> {
        self.provider.check_domain(domain).await
    }

    /// Check availability of multiple domains concurrently.
    ///
    /// Processes up to `config.concurrency` domains in parallel and returns
    /// per-domain results in the same order as the input. Individual failures
    /// don't abort the batch.
    pub async fn check_domains(
        &self,
        domains: &[String],
    ) -> Vec<Result<AvailabilityResult, AvailabilityError>> {
        futures::stream::iter(domains.iter().map(|domain| {
            let checker = self.clone();
            let domain = domain.clone();
            async move { checker.check_domain(&domain).await }
        }))
        .buffered(self.config.concurrency)
        .collect()
        .await
    }

    /// Check domains and yield results as they complete.
    ///
    /// Unlike [`check_domains`](Self::check_domains), completion order is not
    /// input order — useful for streaming frontends that show progress.
    pub fn check_domains_stream(
        &self,
        domains: &[String],
    ) -> Pin<Box<dyn Stream<Item = Result<AvailabilityResult, AvailabilityError>> + Send + '_>>
    {
        let futures = domains
            .iter()
            .map(|domain| {
                let checker = self.clone();
                let domain = domain.clone();
                async move { checker.check_domain(&domain).await }
            })
            .collect::<Vec<_>>();

        Box::pin(futures::stream::iter(futures).buffer_unordered(self.config.concurrency))
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}
