//! Catalog synchronization orchestrator
//!
//! Composes the session context, the remote client, and the catalog
//! store into the operations a consumer actually performs:
//! - Load a page of the catalog, enriched with per-item detail
//! - Create a product from validated fields plus an image
//! - Edit a product's fields and optionally replace its image
//! - Delete a product
//!
//! The store only ever changes here, and only after the server
//! acknowledged the corresponding write; failed operations leave it
//! untouched. Racing page loads are ordered by a request generation:
//! a stale response is discarded rather than clobbering newer state.

use crate::error::SyncError;
use crate::interaction::Interaction;
use crate::session::SessionContext;
use crate::store::CatalogStore;
use crate::types::{EditOutcome, LoadOutcome, PageLoad, SyncConfig};
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use vitrine_client::{ApiError, CatalogApi};
use vitrine_model::{Identity, ImageFile, PageMeta, Product, ProductFields, ProductId};

/// The composed synchronization layer
///
/// Generic over the catalog client so tests drive it with a scripted
/// implementation; production uses `HttpCatalogClient`.
#[derive(Debug)]
pub struct CatalogSync<C: CatalogApi> {
    /// Orchestrator configuration
    config: SyncConfig,
    /// Current authentication state
    session: Arc<SessionContext>,
    /// Remote API mediator
    client: Arc<C>,
    /// Mirror of confirmed server state
    store: Arc<CatalogStore>,
    /// Generation counter ordering racing page loads
    load_generation: AtomicU64,
}

impl<C: CatalogApi> CatalogSync<C> {
    /// Create a new orchestrator over explicitly owned collaborators
    #[must_use]
    pub fn new(
        config: SyncConfig,
        session: Arc<SessionContext>,
        client: Arc<C>,
        store: Arc<CatalogStore>,
    ) -> Self {
        Self {
            config,
            session,
            client,
            store,
            load_generation: AtomicU64::new(0),
        }
    }

    /// The session context
    #[inline]
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The catalog store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Enter a session, e.g. after a successful login or registration
    ///
    /// Whatever was in flight under the previous session is invalidated
    /// by the epoch bump; its results will be discarded.
    pub fn sign_in(&self, identity: Identity, token: impl Into<String>) {
        self.session.sign_in(identity, token);
    }

    /// End the session and drop the mirrored catalog
    pub fn sign_out(&self) {
        self.session.sign_out();
        self.store.clear();
    }

    /// Load one page of the catalog into the store
    ///
    /// Sets the loading flag, lists the page, then enriches every item
    /// with a concurrent detail fetch (the list endpoint may omit
    /// thumbnails). A failed enrichment degrades to the un-enriched
    /// list entry; the failed ids are reported in the outcome so the
    /// presentation layer may surface the partial degrade. If a newer
    /// load or a session transition overtook this call while it was in
    /// flight, the result is discarded and the outcome is
    /// [`LoadOutcome::Superseded`].
    ///
    /// # Errors
    /// [`SyncError::Unauthenticated`] when signed out (nothing is
    /// issued), otherwise the normalized failure of the list call. The
    /// store is untouched on any failure.
    pub async fn load_page(
        &self,
        page: u32,
        filter: Option<&str>,
    ) -> Result<LoadOutcome, SyncError> {
        let token = self.session.current_token().ok_or(SyncError::Unauthenticated)?;
        let epoch = self.session.epoch();
        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(page, filter = filter.unwrap_or(""), "loading catalog page");
        self.store.set_loading(true);

        let result = self.fetch_page(&token, page, filter).await;

        if self.load_generation.load(Ordering::SeqCst) != generation
            || self.session.epoch() != epoch
        {
            // A newer load owns the store and the loading flag now;
            // this result, success or failure, is discarded.
            tracing::debug!(page, "page load superseded, discarding result");
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok((items, meta, failed)) => {
                let count = items.len();
                self.store.replace_all(items, meta);
                self.store.set_loading(false);
                tracing::info!(page, count, failed = failed.len(), "catalog page applied");
                Ok(LoadOutcome::Applied(PageLoad { meta, failed }))
            }
            Err(err) => {
                self.store.set_loading(false);
                tracing::error!(page, error = %err, "page load failed");
                Err(self.handle_api_error(err))
            }
        }
    }

    /// Create a product from validated fields plus an image
    ///
    /// The image is required and checked against the local constraints
    /// before anything is sent. On success the server is asked for the
    /// full record (the create endpoint does not echo the thumbnail)
    /// and the product enters the store at head position. Releasing any
    /// associated preview handle remains the caller's responsibility
    /// after this settles.
    ///
    /// # Errors
    /// [`SyncError::MissingImage`]/[`SyncError::Validation`] before any
    /// network call, [`SyncError::DuplicateSubmission`] when the
    /// interaction already submitted, otherwise the normalized remote
    /// failure. The store is untouched on any failure.
    pub async fn create_product(
        &self,
        fields: ProductFields,
        image: Option<ImageFile>,
        interaction: Option<&Interaction>,
    ) -> Result<Product, SyncError> {
        let token = self.session.current_token().ok_or(SyncError::Unauthenticated)?;
        let epoch = self.session.epoch();
        if let Some(interaction) = interaction {
            interaction.begin_submit()?;
        }
        let result = self.create_inner(&token, epoch, fields, image).await;
        if let Some(interaction) = interaction {
            interaction.complete(result.is_ok());
        }
        result
    }

    async fn create_inner(
        &self,
        token: &str,
        epoch: u64,
        fields: ProductFields,
        image: Option<ImageFile>,
    ) -> Result<Product, SyncError> {
        let image = image.ok_or(SyncError::MissingImage)?;
        vitrine_preview::validate_image(&image)?;

        tracing::info!(title = %fields.title, "creating product");
        let id = self
            .client
            .create(token, &fields, &image)
            .await
            .map_err(|err| self.handle_api_error(err))?;
        let product = self
            .client
            .fetch_one(token, &id)
            .await
            .map_err(|err| self.handle_api_error(err))?;

        if self.session.epoch() == epoch {
            self.store.insert_at_head(product.clone());
        } else {
            tracing::debug!(product = %id, "session changed mid-create, store left alone");
        }
        tracing::info!(product = %id, "product created");
        Ok(product)
    }

    /// Edit a product's fields and optionally replace its image
    ///
    /// Field update and image replacement commit independently on the
    /// server: when the image replacement fails after the fields
    /// committed, the authoritative record is still re-fetched, the
    /// store still refreshed, and the image failure is reported
    /// distinctly in the outcome instead of failing the operation.
    ///
    /// # Errors
    /// As [`CatalogSync::create_product`], except the image is
    /// optional. A failed field update leaves the store untouched.
    pub async fn edit_product(
        &self,
        id: &ProductId,
        fields: ProductFields,
        new_image: Option<ImageFile>,
        interaction: Option<&Interaction>,
    ) -> Result<EditOutcome, SyncError> {
        let token = self.session.current_token().ok_or(SyncError::Unauthenticated)?;
        let epoch = self.session.epoch();
        if let Some(interaction) = interaction {
            interaction.begin_submit()?;
        }
        let result = self.edit_inner(&token, epoch, id, fields, new_image).await;
        if let Some(interaction) = interaction {
            interaction.complete(result.is_ok());
        }
        result
    }

    async fn edit_inner(
        &self,
        token: &str,
        epoch: u64,
        id: &ProductId,
        fields: ProductFields,
        new_image: Option<ImageFile>,
    ) -> Result<EditOutcome, SyncError> {
        if let Some(image) = &new_image {
            vitrine_preview::validate_image(image)?;
        }

        tracing::info!(product = %id, "updating product");
        self.client
            .update_fields(token, id, &fields)
            .await
            .map_err(|err| self.handle_api_error(err))?;

        let image_failure = match &new_image {
            Some(image) => self.client.replace_image(token, id, image).await.err(),
            None => None,
        };
        if let Some(err) = &image_failure {
            // A rejected token forces sign-out even though the failure
            // is captured rather than propagated
            self.force_sign_out_if_unauthorized(err);
            tracing::warn!(product = %id, error = %err, "image replace failed, field changes remain committed");
        }

        let product = self
            .client
            .fetch_one(token, id)
            .await
            .map_err(|err| self.handle_api_error(err))?;

        if self.session.epoch() == epoch {
            self.store.replace(id, product.clone());
        } else {
            tracing::debug!(product = %id, "session changed mid-edit, store left alone");
        }
        Ok(EditOutcome { product, image_failure })
    }

    /// Delete a product
    ///
    /// The store entry is removed only after the server acknowledged
    /// the delete; on failure the item stays visible, so a failed
    /// delete is always observable as "still present".
    ///
    /// # Errors
    /// [`SyncError::Unauthenticated`] when signed out, otherwise the
    /// normalized remote failure.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), SyncError> {
        let token = self.session.current_token().ok_or(SyncError::Unauthenticated)?;
        let epoch = self.session.epoch();

        tracing::info!(product = %id, "deleting product");
        self.client
            .delete(&token, id)
            .await
            .map_err(|err| self.handle_api_error(err))?;

        if self.session.epoch() == epoch {
            self.store.remove(id);
        }
        Ok(())
    }

    /// List then concurrently enrich one page
    async fn fetch_page(
        &self,
        token: &str,
        page: u32,
        filter: Option<&str>,
    ) -> Result<(Vec<Product>, PageMeta, Vec<ProductId>), ApiError> {
        let listing = self
            .client
            .list(token, page, self.config.page_size, filter)
            .await?;

        if !self.config.enrich_listing || listing.items.is_empty() {
            return Ok((listing.items, listing.meta, Vec::new()));
        }

        // Fan out one detail fetch per item; results are joined before
        // any store mutation, so the store never observes partial
        // enrichment.
        let enrichments = listing.items.iter().map(|item| async move {
            match self.client.fetch_one(token, &item.id).await {
                Ok(detail) => (detail, None),
                Err(err) => {
                    tracing::warn!(product = %item.id, error = %err, "detail fetch failed, using list entry");
                    (item.clone(), Some(item.id.clone()))
                }
            }
        });
        let results = join_all(enrichments).await;

        let mut items = Vec::with_capacity(results.len());
        let mut failed = Vec::new();
        for (product, failure) in results {
            if let Some(id) = failure {
                failed.push(id);
            }
            items.push(product);
        }
        Ok((items, listing.meta, failed))
    }

    /// Normalize a remote failure, forcing sign-out on a rejected token
    fn handle_api_error(&self, err: ApiError) -> SyncError {
        self.force_sign_out_if_unauthorized(&err);
        SyncError::Api(err)
    }

    fn force_sign_out_if_unauthorized(&self, err: &ApiError) {
        if err.is_unauthorized() {
            tracing::warn!("token rejected by server, forcing sign-out");
            self.session.sign_out();
            self.store.clear();
        }
    }
}
