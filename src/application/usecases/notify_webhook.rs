use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    application::{handlers::delivery_reporter::DeliveryReporter, services::webhook::WebhookClient},
    domain::{
        models::{DeliveryResult, MessageContent},
        value_objects::{Endpoint, Interval},
    },
};

pub const TRACING_TARGET: &str = "hookpulse::notifier";

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub endpoint: Endpoint,
    pub message: MessageContent,
    pub interval: Interval,
}

/// Counters reported once the notifier loop has stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotifierSummary {
    pub attempts: u64,
    pub delivered: u64,
    pub rejected: u64,
    pub transport_errors: u64,
}

impl NotifierSummary {
    fn record(&mut self, result: &DeliveryResult) {
        self.attempts += 1;
        match result {
            DeliveryResult::Delivered => self.delivered += 1,
            DeliveryResult::Rejected { .. } => self.rejected += 1,
            DeliveryResult::TransportError { .. } => self.transport_errors += 1,
        }
    }
}

pub struct NotifyWebhookUseCase {
    client: Arc<dyn WebhookClient>,
    reporter: Arc<dyn DeliveryReporter>,
    config: NotifierConfig,
}

impl NotifyWebhookUseCase {
    pub fn new(
        client: Arc<dyn WebhookClient>,
        reporter: Arc<dyn DeliveryReporter>,
        config: NotifierConfig,
    ) -> Self {
        Self {
            client,
            reporter,
            config,
        }
    }

    /// Sends the configured message, waits one interval, and repeats until
    /// `shutdown` is cancelled.
    ///
    /// Cancellation is observed between sends and while sleeping; a send
    /// that is already in flight runs to completion first.
    pub async fn run(&self, shutdown: CancellationToken) -> NotifierSummary {
        let endpoint = &self.config.endpoint;
        let interval = self.config.interval.as_duration();
        let mut summary = NotifierSummary::default();

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            interval_ms = interval.as_millis(),
            "Starting webhook notifier"
        );

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            let result = self.client.send(endpoint, &self.config.message).await;
            summary.record(&result);
            log_attempt(endpoint, summary.attempts, &result);
            self.reporter.delivery(endpoint, &result);

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            attempts = summary.attempts,
            delivered = summary.delivered,
            "Webhook notifier stopped"
        );
        self.reporter.stopped(&summary);

        summary
    }
}

fn log_attempt(endpoint: &Endpoint, attempt: u64, result: &DeliveryResult) {
    match result {
        DeliveryResult::Delivered => {
            tracing::debug!(target: TRACING_TARGET, endpoint = %endpoint, attempt, "Message delivered");
        }
        DeliveryResult::Rejected { status, .. } => {
            tracing::warn!(
                target: TRACING_TARGET,
                endpoint = %endpoint,
                attempt,
                status,
                "Endpoint rejected message"
            );
        }
        DeliveryResult::TransportError { description } => {
            tracing::warn!(
                target: TRACING_TARGET,
                endpoint = %endpoint,
                attempt,
                error = %description,
                "Message could not be sent"
            );
        }
    }
}
