use thiserror::Error;

/// Everything that can go wrong inside a provider adapter.
///
/// The aggregator treats every variant except `Cancelled` as "try the next
/// provider"; none of these ever reach the caller of a catalog operation.
/// An empty result set is not an error.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network/transport failure: the request never produced an HTTP
    /// response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Missing or rejected credentials.
    #[error("{provider} authentication failed: {detail}")]
    Auth { provider: &'static str, detail: String },

    /// HTTP 429 from the upstream.
    #[error("rate limited by upstream")]
    RateLimited { retry_after: Option<u64> },

    /// Any other non-2xx response.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response arrived but did not have the shape the adapter expects.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The caller's cancellation token fired. Unlike every other variant
    /// this one propagates through the fallback chain.
    #[error("request cancelled")]
    Cancelled,

    /// The adapter has no usable credentials and will not touch the
    /// network.
    #[error("provider '{0}' is not configured")]
    Unavailable(&'static str),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

impl ProviderError {
    /// A transport failure that never saw an HTTP status. In a browser this
    /// is the signature of a cross-origin rejection, which is what triggers
    /// the relay fallback.
    pub fn is_cors_like(&self) -> bool {
        match self {
            ProviderError::Transport(err) => err.status().is_none(),
            _ => false,
        }
    }

    /// Worth retrying against the same provider (rate limit or 5xx).
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::RateLimited { .. } => true,
            ProviderError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_covers_rate_limits_and_server_errors() {
        assert!(ProviderError::RateLimited { retry_after: None }.is_retryable());
        assert!(ProviderError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(!ProviderError::Status { status: 404, body: String::new() }.is_retryable());
        assert!(!ProviderError::Malformed("nope".into()).is_retryable());
    }

    #[test]
    fn cancelled_is_neither_retryable_nor_cors_like() {
        assert!(!ProviderError::Cancelled.is_retryable());
        assert!(!ProviderError::Cancelled.is_cors_like());
    }
}
