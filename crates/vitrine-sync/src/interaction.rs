//! Interaction state machine
//!
//! One [`Interaction`] instance tracks one user confirmation of a
//! create/edit form: `Idle -> Submitting -> {Committed | Failed}`.
//! `Submitting` is entered at most once, so a double-click cannot issue
//! a duplicate multipart upload; `Committed` and `Failed` are terminal
//! for the instance. A fresh interaction means a fresh instance.

use crate::error::SyncError;
use parking_lot::Mutex;

/// Lifecycle states of one create/edit interaction instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// Created, not yet confirmed
    Idle,
    /// Confirmation in flight
    Submitting,
    /// Terminal: the operation succeeded
    Committed,
    /// Terminal: the operation failed
    Failed,
}

/// State holder for one create/edit interaction
#[derive(Debug)]
pub struct Interaction {
    state: Mutex<InteractionState>,
}

impl Interaction {
    /// Create an idle interaction
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(InteractionState::Idle),
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> InteractionState {
        *self.state.lock()
    }

    /// Whether this instance reached a terminal state
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state(),
            InteractionState::Committed | InteractionState::Failed
        )
    }

    /// Enter `Submitting`
    ///
    /// # Errors
    /// [`SyncError::DuplicateSubmission`] unless the instance is `Idle`.
    pub fn begin_submit(&self) -> Result<(), SyncError> {
        let mut state = self.state.lock();
        if *state != InteractionState::Idle {
            return Err(SyncError::DuplicateSubmission);
        }
        *state = InteractionState::Submitting;
        Ok(())
    }

    /// Settle the instance after the operation resolved
    ///
    /// Only meaningful from `Submitting`; settling an instance twice is
    /// a no-op so completion can run on every exit path.
    pub fn complete(&self, success: bool) {
        let mut state = self.state.lock();
        if *state != InteractionState::Submitting {
            return;
        }
        *state = if success {
            InteractionState::Committed
        } else {
            InteractionState::Failed
        };
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}
