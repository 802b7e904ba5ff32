//! Configuration and operation outcomes

use serde::{Deserialize, Serialize};
use vitrine_client::ApiError;
use vitrine_model::{PageMeta, Product, ProductId};

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Items requested per page
    pub page_size: u32,
    /// Whether page loads fetch per-item detail to fill in thumbnails
    /// the list endpoint omits
    pub enrich_listing: bool,
}

impl SyncConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different page size
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// With enrichment disabled
    #[inline]
    #[must_use]
    pub fn without_enrichment(mut self) -> Self {
        self.enrich_listing = false;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            enrich_listing: true,
        }
    }
}

/// Result of a page load that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoad {
    /// Pagination metadata of the applied page
    pub meta: PageMeta,
    /// Ids whose enrichment fetch failed; those items sit in the store
    /// as the un-enriched list entries. The presentation layer decides
    /// whether to surface the partial degrade.
    pub failed: Vec<ProductId>,
}

/// Outcome of [`crate::CatalogSync::load_page`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was applied to the store
    Applied(PageLoad),
    /// A newer load (or a session transition) overtook this one; its
    /// result was discarded and the store was left alone
    Superseded,
}

impl LoadOutcome {
    /// Whether the store now reflects this load
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Outcome of [`crate::CatalogSync::edit_product`]
///
/// Field updates and image replacement commit independently on the
/// server. When the image replacement fails after the fields committed,
/// `product` still reflects the authoritative post-update state and
/// `image_failure` carries the distinct error to surface on the image
/// field.
#[derive(Debug)]
pub struct EditOutcome {
    /// Authoritative post-update record, as re-fetched from the server
    pub product: Product,
    /// The image replacement failure, if that sub-operation failed
    pub image_failure: Option<ApiError>,
}

impl EditOutcome {
    /// Whether every sub-operation committed
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.image_failure.is_none()
    }
}
