pub mod delivery;
pub mod message;
pub mod outcome;

pub use delivery::{DELIVERED_STATUS, DeliveryResult};
pub use message::{MessageContent, PROBE_MESSAGE, WebhookPayload};
pub use outcome::CheckOutcome;
