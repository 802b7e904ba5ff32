//! Error types for remote API access
//!
//! Normalizes every failure mode of an API call into one taxonomy:
//! - Rejected tokens (HTTP 401)
//! - Missing records (HTTP 404 on detail fetches)
//! - Transport failures with no response at all
//! - Any other non-2xx status
//! - 2xx responses whose body cannot be decoded

use vitrine_model::ProductId;

/// Failure modes of a remote catalog or auth call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the bearer token (HTTP 401); the caller
    /// should force a sign-out
    #[error("server rejected the session token")]
    Unauthorized,

    /// The requested product does not exist (HTTP 404)
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Transport-level failure, no usable response received
    #[error("transport failure: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status other than 401/404
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the response body, empty when undecodable
        message: String,
    },

    /// The server answered 2xx but the body could not be decoded
    #[error("undecodable response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this error means the session token is no longer valid
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
