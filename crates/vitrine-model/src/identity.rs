//! Authenticated identity and session
//!
//! The login endpoint returns a large user profile; only the fields the
//! synchronization layer needs are modeled, the rest are ignored on
//! decode.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile as returned at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Server-assigned user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
}

/// An authenticated session
///
/// Identity and token always travel together: a session either exists
/// with both present or does not exist at all. Half-authenticated states
/// are unrepresentable; the signed-out state is `Option::<Session>::None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Who is signed in
    pub identity: Identity,
    /// Bearer token attached to every authenticated request
    pub token: String,
}

impl Session {
    /// Create a session from a successful login or registration
    #[inline]
    #[must_use]
    pub fn new(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity,
            token: token.into(),
        }
    }
}
