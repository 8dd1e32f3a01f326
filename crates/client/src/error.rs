//! Error types for the Elasticsearch client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to an Elasticsearch cluster.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from Elasticsearch.
    #[error("API error ({status}) at {url}: {message}{}", .error_type.as_ref().map(|t| format!(" [{t}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        error_type: Option<String>,
    },

    /// Invalid response format from Elasticsearch.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Maximum retries exceeded. Carries the error from the final attempt.
    #[error("Maximum retries exceeded ({0} attempts): {1}")]
    MaxRetriesExceeded(usize, Box<ClientError>),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Classify a transport failure from `reqwest`.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() {
            let target = error.url().map(|u| u.to_string()).unwrap_or_default();
            Self::ConnectionRefused(target)
        } else {
            Self::HttpError(error)
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionRefused(_) => true,
            Self::HttpError(e) => e.is_timeout(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (circuit breakers, rejected execution)
    /// - 502: Bad Gateway
    /// - 503: Service Unavailable (cluster not yet formed, master not discovered)
    /// - 504: Gateway Timeout
    ///
    /// Everything else fails immediately, including 500.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// HTTP status carried by this error, looking through retry wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            Self::MaxRetriesExceeded(_, inner) => inner.status(),
            _ => None,
        }
    }

    /// Check if this error is a 404 from the cluster.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if the credentials were accepted but lack privileges.
    pub fn is_permission_error(&self) -> bool {
        self.status() == Some(403)
    }

    /// Check if the cluster could not be reached at all.
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::ConnectionRefused(_) => true,
            Self::HttpError(e) => e.is_connect() || e.is_timeout(),
            Self::MaxRetriesExceeded(_, inner) => inner.is_connection_error(),
            _ => false,
        }
    }
}
