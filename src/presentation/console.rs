use serde::Serialize;

use crate::{
    application::{
        handlers::delivery_reporter::DeliveryReporter, usecases::notify_webhook::NotifierSummary,
    },
    config::OutputFormat,
    domain::{
        models::{CheckOutcome, DeliveryResult},
        value_objects::Endpoint,
    },
};

pub const TRACING_TARGET: &str = "hookpulse::console";

/// Prints one status line per delivery or probe to stdout.
pub struct ConsoleReporter {
    format: OutputFormat,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ConsoleLine<'a> {
    Delivery {
        endpoint: String,
        #[serde(flatten)]
        result: &'a DeliveryResult,
    },
    Check {
        endpoint: String,
        #[serde(flatten)]
        outcome: &'a CheckOutcome,
    },
    Stopped {
        #[serde(flatten)]
        summary: &'a NotifierSummary,
    },
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render_delivery(&self, endpoint: &Endpoint, result: &DeliveryResult) -> String {
        let target = endpoint.redacted();
        match self.format {
            OutputFormat::Json => to_json(&ConsoleLine::Delivery {
                endpoint: target,
                result,
            }),
            OutputFormat::Text => match result {
                DeliveryResult::Delivered => format!("message sent to {target}"),
                DeliveryResult::Rejected { status, body } => {
                    format!("Failed to send message to {target}: {status} - {body}")
                }
                DeliveryResult::TransportError { description } => {
                    format!("An error occurred sending to {target}: {description}")
                }
            },
        }
    }

    pub fn render_check(
        &self,
        raw: &str,
        endpoint: Option<&Endpoint>,
        outcome: &CheckOutcome,
    ) -> String {
        let target = endpoint.map_or_else(|| raw.to_string(), Endpoint::redacted);
        match self.format {
            OutputFormat::Json => to_json(&ConsoleLine::Check {
                endpoint: target,
                outcome,
            }),
            OutputFormat::Text => match outcome {
                CheckOutcome::Skipped { reason } => {
                    format!("Invalid or empty webhook URL skipped: {target:?} ({reason})")
                }
                CheckOutcome::Active => format!("Webhook is active: {target}"),
                CheckOutcome::Inactive { status, body } => {
                    format!("Failed to send message to {target}: {status} - {body}")
                }
                CheckOutcome::Error { description } => {
                    format!("Error checking {target}: {description}")
                }
            },
        }
    }

    pub fn render_stopped(&self, summary: &NotifierSummary) -> String {
        match self.format {
            OutputFormat::Json => to_json(&ConsoleLine::Stopped { summary }),
            OutputFormat::Text => format!(
                "stopped after {} attempts ({} delivered, {} rejected, {} errors)",
                summary.attempts, summary.delivered, summary.rejected, summary.transport_errors
            ),
        }
    }
}

fn to_json(line: &ConsoleLine<'_>) -> String {
    serde_json::to_string(line).unwrap_or_else(|err| {
        tracing::warn!(target: TRACING_TARGET, error = %err, "Failed to encode status line");
        String::from("{}")
    })
}

impl DeliveryReporter for ConsoleReporter {
    fn delivery(&self, endpoint: &Endpoint, result: &DeliveryResult) {
        println!("{}", self.render_delivery(endpoint, result));
    }

    fn check(&self, raw: &str, endpoint: Option<&Endpoint>, outcome: &CheckOutcome) {
        println!("{}", self.render_check(raw, endpoint, outcome));
    }

    fn stopped(&self, summary: &NotifierSummary) {
        println!("{}", self.render_stopped(summary));
    }
}
