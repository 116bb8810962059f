use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::{
    application::services::webhook::WebhookClient,
    domain::{
        models::{DELIVERED_STATUS, DeliveryResult, MessageContent, WebhookPayload},
        value_objects::Endpoint,
    },
};

pub const TRACING_TARGET: &str = "hookpulse::discord";

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Rejection bodies longer than this are cut before being reported.
const MAX_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub no_proxy: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            no_proxy: false,
        }
    }
}

pub fn default_user_agent() -> String {
    format!("hookpulse/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Posts `{"content": ...}` bodies to Discord-style webhooks.
///
/// A single `reqwest::Client` is kept for the lifetime of the process so the
/// notifier loop reuses pooled connections.
pub struct DiscordWebhookClient {
    http: Client,
    timeout: Duration,
}

impl DiscordWebhookClient {
    pub fn new(config: &HttpClientConfig) -> Result<Arc<dyn WebhookClient>, ClientError> {
        Ok(Arc::new(Self::build(config)?) as Arc<dyn WebhookClient>)
    }

    pub fn build(config: &HttpClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout);
        if config.no_proxy {
            builder = builder.no_proxy();
        }

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = config.timeout.as_millis(),
            user_agent = %config.user_agent,
            no_proxy = config.no_proxy,
            "Creating webhook HTTP client"
        );

        Ok(Self {
            http: builder.build()?,
            timeout: config.timeout,
        })
    }

    fn describe_transport_error(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("request timed out after {} ms", self.timeout.as_millis())
        } else if err.is_connect() {
            format!("connection failed: {}", root_cause(err))
        } else if err.is_body() || err.is_decode() {
            format!("failed to read response: {}", root_cause(err))
        } else {
            format!("request failed: {}", root_cause(err))
        }
    }
}

#[async_trait]
impl WebhookClient for DiscordWebhookClient {
    async fn send(&self, endpoint: &Endpoint, content: &MessageContent) -> DeliveryResult {
        tracing::trace!(target: TRACING_TARGET, endpoint = %endpoint, "Posting webhook message");

        let response = match self
            .http
            .post(endpoint.as_str())
            .json(&WebhookPayload::from(content))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return DeliveryResult::TransportError {
                    description: self.describe_transport_error(&err),
                };
            }
        };

        let status = response.status().as_u16();
        if status == DELIVERED_STATUS {
            return DeliveryResult::Delivered;
        }

        let body = match response.text().await {
            Ok(body) => truncate_body(body),
            Err(err) => format!("<unreadable body: {}>", self.describe_transport_error(&err)),
        };
        DeliveryResult::from_status(status, body)
    }
}

fn root_cause(err: &(dyn StdError + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

fn truncate_body(body: String) -> String {
    if body.chars().count() <= MAX_BODY_CHARS {
        return body;
    }
    let mut truncated: String = body.chars().take(MAX_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}
