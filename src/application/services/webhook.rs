use async_trait::async_trait;

use crate::domain::{
    models::{DeliveryResult, MessageContent},
    value_objects::Endpoint,
};

/// One network round trip to a webhook endpoint.
///
/// Implementations never retry and never fail: every transport problem is
/// folded into [`DeliveryResult::TransportError`].
#[async_trait]
pub trait WebhookClient: Send + Sync {
    async fn send(&self, endpoint: &Endpoint, content: &MessageContent) -> DeliveryResult;
}
