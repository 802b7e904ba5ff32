//! The catalog API trait
//!
//! Object-safe seam between the orchestrator and whatever actually
//! answers requests: the real HTTP client in production, a scripted
//! in-memory implementation in tests.

use crate::error::ApiError;
use async_trait::async_trait;
use vitrine_model::{CatalogPage, ImageFile, Product, ProductFields, ProductId};

/// Catalog operations against the remote API
///
/// Implementations are stateless mediators: no caching, no retries.
/// `token` is the bearer token of the current session; callers must not
/// invoke any method without one.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// List one page of the catalog, optionally filtered
    ///
    /// # Errors
    /// `Network` on transport failure, `Unauthorized` on 401, `Server`
    /// on any other non-2xx.
    async fn list(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
        filter: Option<&str>,
    ) -> Result<CatalogPage, ApiError>;

    /// Fetch one product with full detail, thumbnail included
    ///
    /// # Errors
    /// As [`CatalogApi::list`], plus `NotFound` on 404.
    async fn fetch_one(&self, token: &str, id: &ProductId) -> Result<Product, ApiError>;

    /// Create a product with its image; returns the new id only
    ///
    /// The create endpoint is not guaranteed to echo the full thumbnail
    /// object, so obtaining the complete record requires a follow-up
    /// [`CatalogApi::fetch_one`]; that sequencing belongs to the caller.
    ///
    /// # Errors
    /// As [`CatalogApi::list`]; a 2xx response without an id is `Server`.
    async fn create(
        &self,
        token: &str,
        fields: &ProductFields,
        image: &ImageFile,
    ) -> Result<ProductId, ApiError>;

    /// Update title/description/status of an existing product
    ///
    /// # Errors
    /// As [`CatalogApi::list`].
    async fn update_fields(
        &self,
        token: &str,
        id: &ProductId,
        fields: &ProductFields,
    ) -> Result<(), ApiError>;

    /// Replace the image attached to an existing product
    ///
    /// # Errors
    /// As [`CatalogApi::list`].
    async fn replace_image(
        &self,
        token: &str,
        id: &ProductId,
        image: &ImageFile,
    ) -> Result<(), ApiError>;

    /// Delete a product
    ///
    /// # Errors
    /// As [`CatalogApi::list`].
    async fn delete(&self, token: &str, id: &ProductId) -> Result<(), ApiError>;
}
