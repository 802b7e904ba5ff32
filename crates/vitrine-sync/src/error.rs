//! Error types for the synchronization layer
//!
//! One taxonomy for everything an orchestrator operation can surface:
//! - Missing session (never reaches the network)
//! - Local image validation failures (never reach the network)
//! - Normalized remote API failures
//! - Duplicate submissions of one interaction instance
//!
//! Nothing is retried or recovered silently; every failure reaches the
//! caller as one of these variants, and the store is left unmutated.

use vitrine_client::ApiError;
use vitrine_preview::InvalidAsset;

/// Failure modes of an orchestrator operation
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No session token present; the request was never issued
    #[error("not signed in")]
    Unauthenticated,

    /// A product cannot be created without an image
    #[error("a product requires an image")]
    MissingImage,

    /// The candidate image violates the local constraints
    #[error("invalid image: {0}")]
    Validation(#[from] InvalidAsset),

    /// A remote call failed after being issued
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The interaction instance already entered `Submitting`
    #[error("interaction already submitted")]
    DuplicateSubmission,
}

impl SyncError {
    /// Whether the failure happened before any network call
    #[inline]
    #[must_use]
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Api(_))
    }

    /// Whether the server rejected the session token
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }
}
