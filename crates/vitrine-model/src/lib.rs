//! Vitrine Model - domain data model
//!
//! Pure data types shared by every other crate in the workspace:
//! - Products, assets, and catalog pages as the server reports them
//! - Candidate image uploads
//! - The authenticated identity and session
//!
//! No I/O happens here. Wire envelopes (`{data, meta}` wrappers and the
//! like) belong to `vitrine-client`; this crate models the entities
//! themselves.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod identity;
pub mod image;
pub mod product;

// Re-exports for convenience
pub use identity::{Identity, Session};
pub use image::ImageFile;
pub use product::{Asset, AssetId, CatalogPage, PageMeta, Product, ProductFields, ProductId};
