//! Fetch error taxonomy.
//!
//! Every failed request ends up as one of these and is turned into an
//! error notification at the point where the fetch was issued.

use std::fmt;

/// Longest response excerpt carried in an HTTP error message.
const MAX_BODY_EXCERPT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not complete (DNS, refused connection, timeout, ...).
    Network { message: String },
    /// The backend answered with a non-2xx status.
    Http { status: u16, message: String },
    /// The body could not be interpreted in the expected shape.
    Parse { message: String },
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Build an HTTP error from the endpoint and whatever body came back.
    ///
    /// Only the first line of the body is kept, truncated to a short excerpt.
    pub fn http(status: u16, endpoint: &str, body: &str) -> Self {
        let first_line = body.lines().next().unwrap_or("").trim();
        let excerpt: String = first_line.chars().take(MAX_BODY_EXCERPT).collect();
        let message = if excerpt.is_empty() {
            format!("{endpoint} returned status {status}")
        } else {
            format!("{endpoint} returned status {status}: {excerpt}")
        };
        Self::Http { status, message }
    }

    /// Short error name shown to the user.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NetworkError",
            Self::Http { .. } => "HTTPError",
            Self::Parse { .. } => "ParseError",
        }
    }

    /// Machine-readable code: the HTTP status for HTTP errors.
    pub fn code(&self) -> String {
        match self {
            Self::Network { .. } => "ERR_NETWORK".to_string(),
            Self::Http { status, .. } => status.to_string(),
            Self::Parse { .. } => "ERR_BAD_RESPONSE".to_string(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Network { message } | Self::Http { message, .. } | Self::Parse { message } => {
                message
            }
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (code: {})", self.name(), self.message(), self.code())
    }
}

impl std::error::Error for FetchError {}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}
