use thiserror::Error;

use super::value_objects::SkipReason;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: SkipReason },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("none of the {0} supplied endpoints is a valid http(s) URL")]
    NoValidEndpoints(usize),
}
