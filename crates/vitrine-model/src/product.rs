//! Product, asset, and catalog page types
//!
//! These mirror what the remote catalog API reports. Identity of a product
//! is its server-assigned `id`; timestamps are server-assigned and never
//! produced locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned product identifier (immutable)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    /// Create from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Server-assigned asset identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl AssetId {
    /// Create from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A durably stored uploaded image attached to a product
///
/// Owned by exactly one product; immutable once attached except via an
/// explicit replace. The server reports more bookkeeping fields than
/// these; unknown fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Asset identifier
    pub id: AssetId,
    /// Durable remote URL
    pub url: String,
    /// Size in bytes
    pub size: u64,
    /// File name as originally uploaded
    pub original_name: String,
    /// MIME type as originally uploaded
    pub mime_type: String,
}

/// A product record as confirmed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier
    pub id: ProductId,
    /// Product title
    pub title: String,
    /// Product description
    pub description: String,
    /// Active/inactive flag
    pub status: bool,
    /// Creation timestamp; the list endpoint may omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Attached image, absent until one is uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Asset>,
}

impl Product {
    /// Whether the record carries full thumbnail detail
    ///
    /// The list endpoint may omit the thumbnail object; the detail
    /// endpoint reports it. Used to decide whether enrichment added
    /// anything.
    #[inline]
    #[must_use]
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}

/// The validated field payload a caller submits for create/update
///
/// Text-level validation (minimum lengths and the like) is the
/// presentation layer's job; this layer trusts the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    /// Product title
    pub title: String,
    /// Product description
    pub description: String,
    /// Active/inactive flag; absent leaves the server value untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl ProductFields {
    /// Create a field payload with no status change
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: None,
        }
    }

    /// With an explicit status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }
}

/// Pagination metadata as the server reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Page number, 1-based
    pub page: u32,
    /// Requested page size
    pub page_size: u32,
    /// Total matching items across all pages
    pub total: u64,
    /// Total page count
    pub total_pages: u32,
}

/// One page of the paginated, filterable product listing
///
/// Item ordering is server-defined and preserved as received; nothing in
/// this workspace re-sorts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Products in server order
    pub items: Vec<Product>,
    /// Pagination metadata
    pub meta: PageMeta,
}
