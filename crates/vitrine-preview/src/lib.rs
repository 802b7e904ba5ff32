//! Vitrine Preview - local preview resource management
//!
//! A preview handle is an ephemeral, process-local reference to image
//! bytes that are not yet durable on the server. The manager owns both
//! sides of the lifecycle:
//! - [`PreviewManager::create_preview`] validates local constraints and
//!   allocates a handle
//! - [`PreviewManager::release`] frees the held bytes, idempotently
//!
//! Release used to be scattered across call sites in the interaction
//! layer; it is centralized here so "every create is matched by exactly
//! one release" is a single tested code path. [`PreviewManager::stats`]
//! exposes counters so tests can assert the no-leak property.
//!
//! No network or store access happens in this crate.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;
use vitrine_model::ImageFile;

/// MIME types accepted for product images
pub const ALLOWED_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Hard ceiling on image size: 5 MiB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Why a candidate image was rejected locally
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAsset {
    /// MIME type outside the allow-list
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    /// Image larger than the fixed ceiling
    #[error("image too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge {
        /// Actual size in bytes
        size: usize,
        /// The ceiling that was exceeded
        limit: usize,
    },
}

/// Validate the local image constraints without allocating a handle
///
/// The same checks [`PreviewManager::create_preview`] applies; exported
/// so the orchestrator can enforce identical constraints on files
/// submitted without a preview.
///
/// # Errors
/// [`InvalidAsset`] when the MIME type is not allow-listed or the file
/// exceeds [`MAX_IMAGE_BYTES`].
pub fn validate_image(file: &ImageFile) -> Result<(), InvalidAsset> {
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(InvalidAsset::UnsupportedType(file.mime_type.clone()));
    }
    if file.size() > MAX_IMAGE_BYTES {
        return Err(InvalidAsset::TooLarge {
            size: file.size(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Opaque reference to a live preview resource
///
/// Cheap to copy; the bytes stay with the manager. A handle must never
/// outlive the interaction that created it: the owner releases it on
/// every exit path (cancel, submit success, submit failure, teardown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    id: Uuid,
}

impl std::fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Lifecycle counters for leak detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Handles allocated so far
    pub created: usize,
    /// Handles actually freed (double releases do not count)
    pub released: usize,
    /// Handles currently live
    pub live: usize,
}

/// Owner of all live preview resources
#[derive(Debug, Default)]
pub struct PreviewManager {
    /// Live previews by handle id
    active: DashMap<Uuid, Arc<ImageFile>>,
    /// Total handles allocated
    created: AtomicUsize,
    /// Total handles freed
    released: AtomicUsize,
}

impl PreviewManager {
    /// Create an empty manager
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a candidate image and allocate a preview handle
    ///
    /// # Errors
    /// [`InvalidAsset`] when the file violates the local constraints; no
    /// handle is allocated in that case.
    pub fn create_preview(&self, file: ImageFile) -> Result<PreviewHandle, InvalidAsset> {
        validate_image(&file)?;
        let handle = PreviewHandle { id: Uuid::new_v4() };
        tracing::debug!(preview = %handle, file = %file.file_name, "preview created");
        self.active.insert(handle.id, Arc::new(file));
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(handle)
    }

    /// Free the resource behind a handle
    ///
    /// Idempotent: releasing an already-released or unknown handle is a
    /// no-op, not an error.
    pub fn release(&self, handle: PreviewHandle) {
        if self.active.remove(&handle.id).is_some() {
            tracing::debug!(preview = %handle, "preview released");
            self.released.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Replace a previous selection with a new file
    ///
    /// The old handle is released first; a new handle is allocated only
    /// if the new file passes validation. On a validation failure the
    /// old handle is gone either way, matching the release-then-create
    /// contract.
    ///
    /// # Errors
    /// As [`PreviewManager::create_preview`].
    pub fn supersede(
        &self,
        old: Option<PreviewHandle>,
        file: ImageFile,
    ) -> Result<PreviewHandle, InvalidAsset> {
        if let Some(old) = old {
            self.release(old);
        }
        self.create_preview(file)
    }

    /// Access the image behind a live handle
    ///
    /// The local analogue of a preview URL: `None` once released.
    #[must_use]
    pub fn resolve(&self, handle: PreviewHandle) -> Option<Arc<ImageFile>> {
        self.active.get(&handle.id).map(|entry| Arc::clone(entry.value()))
    }

    /// Lifecycle counters
    #[must_use]
    pub fn stats(&self) -> PreviewStats {
        PreviewStats {
            created: self.created.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            live: self.active.len(),
        }
    }
}
