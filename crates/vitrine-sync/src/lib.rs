//! Vitrine Sync - catalog synchronization orchestrator
//!
//! The composed client-side synchronization layer:
//! - [`SessionContext`]: explicitly owned authentication state
//! - [`CatalogStore`]: the in-memory mirror of confirmed server state
//! - [`Interaction`]: the per-submission state machine
//! - [`CatalogSync`]: the operations a consumer performs against all of
//!   the above
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine_client::{ClientConfig, HttpCatalogClient};
//! use vitrine_sync::{CatalogStore, CatalogSync, SessionContext, SyncConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpCatalogClient::new(ClientConfig::default())?);
//! let sync = CatalogSync::new(
//!     SyncConfig::new(),
//!     Arc::new(SessionContext::new()),
//!     client,
//!     Arc::new(CatalogStore::new()),
//! );
//!
//! sync.sign_in(identity, token);
//! let outcome = sync.load_page(1, None).await?;
//! println!("{} products loaded", sync.store().len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod error;
pub mod interaction;
pub mod session;
pub mod store;
pub mod sync;
pub mod types;

// Re-exports for convenience
pub use error::SyncError;
pub use interaction::{Interaction, InteractionState};
pub use session::SessionContext;
pub use store::CatalogStore;
pub use sync::CatalogSync;
pub use types::{EditOutcome, LoadOutcome, PageLoad, SyncConfig};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the synchronization layer
    pub use crate::{
        CatalogStore, CatalogSync, EditOutcome, Interaction, InteractionState, LoadOutcome,
        SessionContext, SyncConfig, SyncError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
