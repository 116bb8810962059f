use crate::{
    application::usecases::notify_webhook::NotifierSummary,
    domain::{
        models::{CheckOutcome, DeliveryResult},
        value_objects::Endpoint,
    },
};

/// Observer for delivery attempts and probe results.
pub trait DeliveryReporter: Send + Sync {
    fn delivery(&self, endpoint: &Endpoint, result: &DeliveryResult);
    /// `endpoint` is the validated form of `raw`, absent when it was skipped.
    fn check(&self, raw: &str, endpoint: Option<&Endpoint>, outcome: &CheckOutcome);
    fn stopped(&self, summary: &NotifierSummary);
}
