use serde::{Deserialize, Serialize};

/// The only status code the webhook endpoint answers with on success.
pub const DELIVERED_STATUS: u16 = 204;

/// Outcome of exactly one POST to an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DeliveryResult {
    Delivered,
    Rejected { status: u16, body: String },
    TransportError { description: String },
}

impl DeliveryResult {
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        if status == DELIVERED_STATUS {
            DeliveryResult::Delivered
        } else {
            DeliveryResult::Rejected {
                status,
                body: body.into(),
            }
        }
    }
}
