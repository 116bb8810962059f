use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Message sent by the health checker when probing an endpoint.
pub const PROBE_MESSAGE: &str = "Test";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageContent {
    body: String,
}

impl MessageContent {
    pub fn new(body: impl Into<String>) -> Result<Self, DomainError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(DomainError::Validation(
                "message content must not be empty".to_string(),
            ));
        }
        Ok(Self { body })
    }

    pub fn probe() -> Self {
        Self {
            body: PROBE_MESSAGE.to_string(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// JSON body accepted by the webhook endpoint.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub content: &'a str,
}

impl<'a> From<&'a MessageContent> for WebhookPayload<'a> {
    fn from(message: &'a MessageContent) -> Self {
        Self {
            content: message.body(),
        }
    }
}
