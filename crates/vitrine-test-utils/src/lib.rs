//! Testing utilities for the Vitrine workspace
//!
//! Shared fixtures plus [`ScriptedCatalog`], an in-memory `CatalogApi`
//! implementation that records every call and fails on cue, so
//! orchestrator tests can assert both store outcomes and network
//! behavior (e.g. "zero calls were issued").

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use vitrine_client::{ApiError, CatalogApi};
use vitrine_model::{
    Asset, AssetId, CatalogPage, Identity, ImageFile, PageMeta, Product, ProductFields, ProductId,
};

/// A fixed identity for session fixtures
pub fn test_identity() -> Identity {
    Identity {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
    }
}

/// A valid jpeg candidate of the given size
pub fn jpeg_image(size: usize) -> ImageFile {
    ImageFile::new("photo.jpg", "image/jpeg", vec![0xAB; size])
}

/// A candidate with an out-of-allowlist MIME type
pub fn gif_image(size: usize) -> ImageFile {
    ImageFile::new("anim.gif", "image/gif", vec![0xAB; size])
}

/// A full product record, thumbnail included
pub fn sample_product(id: &str) -> Product {
    Product {
        id: ProductId::from(id),
        title: format!("Product {id}"),
        description: format!("Description of {id}"),
        status: true,
        created_at: Some(Utc::now()),
        updated_at: Utc::now(),
        thumbnail: Some(Asset {
            id: AssetId::new(format!("asset-{id}")),
            url: format!("https://cdn.example.com/{id}.jpg"),
            size: 1024,
            original_name: format!("{id}.jpg"),
            mime_type: "image/jpeg".to_string(),
        }),
    }
}

/// One recorded call against [`ScriptedCatalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { page: u32, filter: Option<String> },
    FetchOne(ProductId),
    Create { title: String },
    UpdateFields(ProductId),
    ReplaceImage(ProductId),
    Delete(ProductId),
}

/// A scripted failure for one operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Answer HTTP 401
    Unauthorized,
    /// Answer HTTP 404
    NotFound,
    /// Answer the given non-2xx status
    Server(u16),
}

impl Fault {
    fn into_error(self, id: &ProductId) -> ApiError {
        match self {
            Self::Unauthorized => ApiError::Unauthorized,
            Self::NotFound => ApiError::NotFound(id.clone()),
            Self::Server(status) => ApiError::Server {
                status,
                message: "scripted failure".to_string(),
            },
        }
    }
}

#[derive(Debug, Default)]
struct ServerState {
    products: Vec<Product>,
    required_token: Option<String>,
    fail_fetch_for: HashSet<ProductId>,
    fault_list: Option<Fault>,
    fault_create: Option<Fault>,
    fault_update: Option<Fault>,
    fault_replace_image: Option<Fault>,
    fault_delete: Option<Fault>,
    list_delays: VecDeque<Duration>,
}

/// In-memory catalog server double
///
/// Mimics the remote API's observable behavior: the list endpoint
/// strips thumbnails (enrichment exists because of that), the create
/// endpoint returns only an id, and faults are injected per operation.
#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    state: Mutex<ServerState>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the scripted server
    pub fn seed_product(&self, id: &str, title: &str, with_thumbnail: bool) -> Product {
        let mut product = sample_product(id);
        product.title = title.to_string();
        if !with_thumbnail {
            product.thumbnail = None;
        }
        self.state.lock().products.push(product.clone());
        product
    }

    /// Reject any bearer token other than this one
    pub fn require_token(&self, token: &str) {
        self.state.lock().required_token = Some(token.to_string());
    }

    /// Make the detail fetch for one id answer HTTP 500
    pub fn fail_fetch_for(&self, id: &str) {
        self.state.lock().fail_fetch_for.insert(ProductId::from(id));
    }

    pub fn fault_list(&self, fault: Fault) {
        self.state.lock().fault_list = Some(fault);
    }

    pub fn fault_create(&self, fault: Fault) {
        self.state.lock().fault_create = Some(fault);
    }

    pub fn fault_update(&self, fault: Fault) {
        self.state.lock().fault_update = Some(fault);
    }

    pub fn fault_replace_image(&self, fault: Fault) {
        self.state.lock().fault_replace_image = Some(fault);
    }

    pub fn fault_delete(&self, fault: Fault) {
        self.state.lock().fault_delete = Some(fault);
    }

    /// Delay the next list call, for staleness/race tests
    pub fn delay_next_list(&self, delay: Duration) {
        self.state.lock().list_delays.push_back(delay);
    }

    /// Everything the orchestrator asked for, in call order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Total number of calls issued
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Current server-side product list
    pub fn server_products(&self) -> Vec<Product> {
        self.state.lock().products.clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn check_token(&self, token: &str) -> Result<(), ApiError> {
        let state = self.state.lock();
        match &state.required_token {
            Some(required) if required != token => Err(ApiError::Unauthorized),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for ScriptedCatalog {
    async fn list(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
        filter: Option<&str>,
    ) -> Result<CatalogPage, ApiError> {
        self.record(Call::List {
            page,
            filter: filter.map(String::from),
        });

        let delay = self.state.lock().list_delays.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.check_token(token)?;
        let state = self.state.lock();
        if let Some(fault) = state.fault_list {
            return Err(fault.into_error(&ProductId::from("")));
        }

        let filtered: Vec<&Product> = state
            .products
            .iter()
            .filter(|product| filter.map_or(true, |f| product.title.contains(f)))
            .collect();
        let total = filtered.len() as u64;
        let start = ((page.max(1) - 1) * page_size) as usize;
        let items: Vec<Product> = filtered
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .map(|product| {
                // The real list endpoint omits the thumbnail object
                let mut stripped = product.clone();
                stripped.thumbnail = None;
                stripped
            })
            .collect();
        Ok(CatalogPage {
            items,
            meta: PageMeta {
                page,
                page_size,
                total,
                total_pages: total.div_ceil(u64::from(page_size.max(1))) as u32,
            },
        })
    }

    async fn fetch_one(&self, token: &str, id: &ProductId) -> Result<Product, ApiError> {
        self.record(Call::FetchOne(id.clone()));
        self.check_token(token)?;

        let state = self.state.lock();
        if state.fail_fetch_for.contains(id) {
            return Err(ApiError::Server {
                status: 500,
                message: "scripted detail failure".to_string(),
            });
        }
        state
            .products
            .iter()
            .find(|product| &product.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.clone()))
    }

    async fn create(
        &self,
        token: &str,
        fields: &ProductFields,
        image: &ImageFile,
    ) -> Result<ProductId, ApiError> {
        self.record(Call::Create {
            title: fields.title.clone(),
        });
        self.check_token(token)?;

        let mut state = self.state.lock();
        if let Some(fault) = state.fault_create {
            return Err(fault.into_error(&ProductId::from("")));
        }

        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let id = ProductId::new(format!("new-{n}"));
        let product = Product {
            id: id.clone(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            status: fields.status.unwrap_or(true),
            created_at: Some(Utc::now()),
            updated_at: Utc::now(),
            thumbnail: Some(Asset {
                id: AssetId::new(format!("asset-new-{n}")),
                url: format!("https://cdn.example.com/new-{n}"),
                size: image.size() as u64,
                original_name: image.file_name.clone(),
                mime_type: image.mime_type.clone(),
            }),
        };
        state.products.push(product);
        Ok(id)
    }

    async fn update_fields(
        &self,
        token: &str,
        id: &ProductId,
        fields: &ProductFields,
    ) -> Result<(), ApiError> {
        self.record(Call::UpdateFields(id.clone()));
        self.check_token(token)?;

        let mut state = self.state.lock();
        if let Some(fault) = state.fault_update {
            return Err(fault.into_error(id));
        }
        let product = state
            .products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| ApiError::NotFound(id.clone()))?;
        product.title = fields.title.clone();
        product.description = fields.description.clone();
        if let Some(status) = fields.status {
            product.status = status;
        }
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn replace_image(
        &self,
        token: &str,
        id: &ProductId,
        image: &ImageFile,
    ) -> Result<(), ApiError> {
        self.record(Call::ReplaceImage(id.clone()));
        self.check_token(token)?;

        let mut state = self.state.lock();
        if let Some(fault) = state.fault_replace_image {
            return Err(fault.into_error(id));
        }
        let product = state
            .products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| ApiError::NotFound(id.clone()))?;
        product.thumbnail = Some(Asset {
            id: AssetId::new(format!("asset-{id}-replaced")),
            url: format!("https://cdn.example.com/{id}-replaced"),
            size: image.size() as u64,
            original_name: image.file_name.clone(),
            mime_type: image.mime_type.clone(),
        });
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, token: &str, id: &ProductId) -> Result<(), ApiError> {
        self.record(Call::Delete(id.clone()));
        self.check_token(token)?;

        let mut state = self.state.lock();
        if let Some(fault) = state.fault_delete {
            return Err(fault.into_error(id));
        }
        let before = state.products.len();
        state.products.retain(|product| &product.id != id);
        if state.products.len() == before {
            return Err(ApiError::NotFound(id.clone()));
        }
        Ok(())
    }
}
