//! Session context
//!
//! Explicitly owned, passed-by-reference session state rather than an
//! ambient singleton: construct one per application (or per test), share
//! it by `Arc`. Two lifecycle states, signed-out and signed-in; identity
//! and token always change together, so a half-authenticated state is
//! unrepresentable.
//!
//! Every sign-in and sign-out bumps the session epoch. Operations capture
//! the epoch when they start and re-check it before mutating the store,
//! which invalidates whatever was in flight across the transition.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use vitrine_model::{Identity, Session};

/// Holder of the current authentication state
#[derive(Debug, Default)]
pub struct SessionContext {
    /// Current session; `None` is the signed-out state
    inner: RwLock<Option<Session>>,
    /// Bumped on every sign-in and sign-out
    epoch: AtomicU64,
}

impl SessionContext {
    /// Create a signed-out context
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the signed-in state, replacing any prior session
    pub fn sign_in(&self, identity: Identity, token: impl Into<String>) {
        let session = Session::new(identity, token);
        tracing::info!(user = %session.identity.email, "signed in");
        *self.inner.write() = Some(session);
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Enter the signed-out state unconditionally
    pub fn sign_out(&self) {
        let mut guard = self.inner.write();
        if guard.take().is_some() {
            tracing::info!("signed out");
        }
        drop(guard);
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// The current bearer token, absent when signed out
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.inner.read().as_ref().map(|session| session.token.clone())
    }

    /// The signed-in identity, absent when signed out
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.inner.read().as_ref().map(|session| session.identity.clone())
    }

    /// Whether a session exists
    #[inline]
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Monotonically increasing counter of session transitions
    #[inline]
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}
