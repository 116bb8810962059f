use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::notify_webhook::NotifierSummary;
use crate::{
    application::{handlers::delivery_reporter::DeliveryReporter, services::webhook::WebhookClient},
    domain::{
        models::{CheckOutcome, DeliveryResult, MessageContent},
        value_objects::Endpoint,
    },
};

/// Scripted webhook client that counts every network call it would make.
pub struct MockWebhookClient {
    default: DeliveryResult,
    responses: HashMap<String, DeliveryResult>,
    delays: HashMap<String, Duration>,
    default_delay: Option<Duration>,
    script: Mutex<VecDeque<DeliveryResult>>,
    cancel_after: Option<(usize, CancellationToken)>,
    calls: Mutex<Vec<String>>,
    bodies: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockWebhookClient {
    pub fn answering(default: DeliveryResult) -> Self {
        Self {
            default,
            responses: HashMap::new(),
            delays: HashMap::new(),
            default_delay: None,
            script: Mutex::new(VecDeque::new()),
            cancel_after: None,
            calls: Mutex::new(Vec::new()),
            bodies: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, url: &str, result: DeliveryResult) -> Self {
        self.responses.insert(url.to_string(), result);
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Delay for every endpoint without its own entry in `with_delay`.
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    pub fn with_script(self, results: Vec<DeliveryResult>) -> Self {
        *self.script.lock().unwrap() = results.into();
        self
    }

    pub fn cancel_after(mut self, sends: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((sends, token));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    /// Highest number of sends that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebhookClient for MockWebhookClient {
    async fn send(&self, endpoint: &Endpoint, content: &MessageContent) -> DeliveryResult {
        let key = endpoint.as_str().to_string();
        let sends = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(key.clone());
            calls.len()
        };
        self.bodies.lock().unwrap().push(content.body().to_string());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&key).or(self.default_delay.as_ref()) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().unwrap().push(key.clone());

        if let Some((after, token)) = &self.cancel_after {
            if sends >= *after {
                token.cancel();
            }
        }

        if let Some(result) = self.script.lock().unwrap().pop_front() {
            return result;
        }
        self.responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub deliveries: Mutex<Vec<DeliveryResult>>,
    pub checks: Mutex<Vec<(String, CheckOutcome)>>,
    pub stops: Mutex<Vec<NotifierSummary>>,
}

impl DeliveryReporter for RecordingReporter {
    fn delivery(&self, _endpoint: &Endpoint, result: &DeliveryResult) {
        self.deliveries.lock().unwrap().push(result.clone());
    }

    fn check(&self, raw: &str, _endpoint: Option<&Endpoint>, outcome: &CheckOutcome) {
        self.checks
            .lock()
            .unwrap()
            .push((raw.to_string(), outcome.clone()));
    }

    fn stopped(&self, summary: &NotifierSummary) {
        self.stops.lock().unwrap().push(*summary);
    }
}
