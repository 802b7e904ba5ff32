//! Vitrine Client - remote catalog API access
//!
//! Stateless request/response mediation against the remote product API:
//! - [`CatalogApi`]: the trait seam the orchestrator and test doubles share
//! - [`HttpCatalogClient`]: the `reqwest`-backed implementation
//! - [`AuthClient`]: login, registration, and session refresh
//!
//! Every authenticated call attaches `Authorization: Bearer <token>`.
//! Nothing here caches and nothing here retries; retry policy belongs to
//! the caller, because a retried multipart upload risks duplicate product
//! creation.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_client::{CatalogApi, ClientConfig, HttpCatalogClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpCatalogClient::new(ClientConfig::default())?;
//! let page = client.list("token", 1, 10, None).await?;
//! println!("{} products", page.items.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod api;
pub mod auth;
pub mod error;
pub mod http;
mod wire;

// Re-exports for convenience
pub use api::CatalogApi;
pub use auth::{AuthClient, AuthResponse, Phone, Registration};
pub use error::ApiError;
pub use http::{ClientConfig, HttpCatalogClient};
