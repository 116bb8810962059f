use serde::{Deserialize, Serialize};

use super::delivery::DeliveryResult;
use crate::domain::value_objects::SkipReason;

/// Liveness verdict for one endpoint handed to the health checker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    Skipped { reason: SkipReason },
    Active,
    Inactive { status: u16, body: String },
    Error { description: String },
}

impl CheckOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, CheckOutcome::Skipped { .. })
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CheckOutcome::Active)
    }
}

impl From<DeliveryResult> for CheckOutcome {
    fn from(result: DeliveryResult) -> Self {
        match result {
            DeliveryResult::Delivered => CheckOutcome::Active,
            DeliveryResult::Rejected { status, body } => CheckOutcome::Inactive { status, body },
            DeliveryResult::TransportError { description } => CheckOutcome::Error { description },
        }
    }
}
