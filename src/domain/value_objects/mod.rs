use std::fmt::{self, Write as _};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::DomainError;

/// Why an endpoint string was not accepted as a webhook target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Empty,
    UnsupportedScheme,
    Malformed,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Empty => "empty",
            SkipReason::UnsupportedScheme => "unsupported_scheme",
            SkipReason::Malformed => "malformed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Empty => "endpoint is empty",
            SkipReason::UnsupportedScheme => "endpoint must start with http:// or https://",
            SkipReason::Malformed => "endpoint is not a valid URL",
        };
        f.write_str(text)
    }
}

/// A validated webhook target. Only `http` and `https` URLs with a host
/// can be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Validates `raw` exactly as given. Surrounding whitespace and
    /// upper-case schemes are rejected, not normalized.
    pub fn parse(raw: &str) -> Result<Self, SkipReason> {
        if raw.is_empty() {
            return Err(SkipReason::Empty);
        }

        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Err(SkipReason::UnsupportedScheme);
        }

        let url = Url::parse(raw).map_err(|_| SkipReason::Malformed)?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(SkipReason::Malformed);
        }

        Ok(Self { url })
    }

    pub fn try_from_config(raw: &str) -> Result<Self, DomainError> {
        Self::parse(raw).map_err(|reason| DomainError::InvalidEndpoint {
            endpoint: raw.to_string(),
            reason,
        })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Renders the URL for console and log output.
    ///
    /// Credentials and the query string are dropped and, when the path has
    /// at least two segments, the last one is masked. Discord webhook URLs
    /// keep their token there (`/api/webhooks/{id}/{token}`).
    pub fn redacted(&self) -> String {
        let mut segments: Vec<&str> = self
            .url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();
        while segments.last().is_some_and(|segment| segment.is_empty()) {
            segments.pop();
        }
        if segments.len() >= 2 {
            if let Some(last) = segments.last_mut() {
                *last = "***";
            }
        }

        let mut rendered = format!(
            "{}://{}",
            self.url.scheme(),
            self.url.host_str().unwrap_or_default()
        );
        if let Some(port) = self.url.port() {
            let _ = write!(rendered, ":{port}");
        }
        for segment in segments {
            rendered.push('/');
            rendered.push_str(segment);
        }
        if self.url.query().is_some() {
            rendered.push_str("?***");
        }
        rendered
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Delay between two consecutive sends of the notifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval(Duration);

impl Interval {
    pub fn new(duration: Duration) -> Result<Self, DomainError> {
        if duration.is_zero() {
            return Err(DomainError::Validation(
                "resend interval must be greater than zero".to_string(),
            ));
        }
        Ok(Self(duration))
    }

    pub fn from_secs(secs: u64) -> Result<Self, DomainError> {
        Self::new(Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}
