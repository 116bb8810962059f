use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::{
    application::{handlers::delivery_reporter::DeliveryReporter, services::webhook::WebhookClient},
    domain::{
        errors::DomainError,
        models::{CheckOutcome, MessageContent},
        value_objects::Endpoint,
    },
};

pub const TRACING_TARGET: &str = "hookpulse::checker";

/// Probes allowed in flight at once.
pub const DEFAULT_CHECK_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub probe: MessageContent,
    pub concurrency: NonZeroUsize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            probe: MessageContent::probe(),
            concurrency: DEFAULT_CHECK_CONCURRENCY,
        }
    }
}

pub struct CheckWebhooksUseCase {
    client: Arc<dyn WebhookClient>,
    reporter: Arc<dyn DeliveryReporter>,
    config: CheckerConfig,
}

impl CheckWebhooksUseCase {
    pub fn new(
        client: Arc<dyn WebhookClient>,
        reporter: Arc<dyn DeliveryReporter>,
        config: CheckerConfig,
    ) -> Self {
        Self {
            client,
            reporter,
            config,
        }
    }

    /// Runs [`check_all`](Self::check_all) and fails when not a single entry
    /// was a usable endpoint.
    pub async fn run(
        &self,
        endpoints: &[String],
    ) -> Result<Vec<(String, CheckOutcome)>, DomainError> {
        let results = self.check_all(endpoints).await;
        if results.iter().all(|(_, outcome)| outcome.is_skipped()) {
            return Err(DomainError::NoValidEndpoints(results.len()));
        }
        Ok(results)
    }

    /// Probes every endpoint once and returns the outcomes in input order.
    ///
    /// All entries are validated before the first request goes out; invalid
    /// ones are reported as skipped and never contacted. Valid endpoints are
    /// probed concurrently, at most `concurrency` at a time.
    pub async fn check_all(&self, endpoints: &[String]) -> Vec<(String, CheckOutcome)> {
        let validated: Vec<Result<Endpoint, _>> =
            endpoints.iter().map(|raw| Endpoint::parse(raw)).collect();

        tracing::info!(
            target: TRACING_TARGET,
            total = endpoints.len(),
            valid = validated.iter().filter(|entry| entry.is_ok()).count(),
            concurrency = self.config.concurrency.get(),
            "Checking webhooks"
        );

        let probes = validated.iter().map(|entry| async move {
            match entry {
                Ok(endpoint) => {
                    CheckOutcome::from(self.client.send(endpoint, &self.config.probe).await)
                }
                Err(reason) => CheckOutcome::Skipped { reason: *reason },
            }
        });
        let outcomes: Vec<CheckOutcome> = stream::iter(probes)
            .buffered(self.config.concurrency.get())
            .collect()
            .await;

        let results: Vec<(String, CheckOutcome)> =
            endpoints.iter().cloned().zip(outcomes).collect();

        for ((raw, outcome), entry) in results.iter().zip(&validated) {
            let endpoint = entry.as_ref().ok();
            log_outcome(raw, endpoint, outcome);
            self.reporter.check(raw, endpoint, outcome);
        }

        tracing::info!(
            target: TRACING_TARGET,
            active = results.iter().filter(|(_, outcome)| outcome.is_active()).count(),
            skipped = results.iter().filter(|(_, outcome)| outcome.is_skipped()).count(),
            "Webhook check finished"
        );

        results
    }
}

fn log_outcome(raw: &str, endpoint: Option<&Endpoint>, outcome: &CheckOutcome) {
    let endpoint = endpoint.map_or_else(|| raw.to_string(), Endpoint::redacted);

    match outcome {
        CheckOutcome::Skipped { reason } => {
            tracing::debug!(target: TRACING_TARGET, endpoint = %endpoint, reason = reason.as_str(), "Endpoint skipped");
        }
        CheckOutcome::Active => {
            tracing::debug!(target: TRACING_TARGET, endpoint = %endpoint, "Endpoint is active");
        }
        CheckOutcome::Inactive { status, .. } => {
            tracing::warn!(target: TRACING_TARGET, endpoint = %endpoint, status, "Endpoint is inactive");
        }
        CheckOutcome::Error { description } => {
            tracing::warn!(target: TRACING_TARGET, endpoint = %endpoint, error = %description, "Endpoint check failed");
        }
    }
}
