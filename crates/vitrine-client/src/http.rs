//! `reqwest`-backed catalog client
//!
//! Translates [`CatalogApi`] operations into HTTP requests and
//! normalizes responses into domain types and [`ApiError`]s. Timeouts
//! are a property of the underlying `reqwest::Client`
//! ([`ClientConfig::timeout_ms`]), not of individual calls.

use crate::api::CatalogApi;
use crate::error::ApiError;
use crate::wire::{Ack, ListEnvelope, ProductEnvelope};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vitrine_model::{CatalogPage, ImageFile, Product, ProductFields, ProductId};

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote API, no trailing slash required
    pub base_url: String,
    /// Request timeout in milliseconds, covering the full request lifecycle
    pub timeout_ms: u64,
    /// User agent string for outbound requests
    pub user_agent: String,
}

impl ClientConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With a different request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-teste-front-production.up.railway.app".to_string(),
            timeout_ms: 10_000,
            user_agent: "vitrine/0.1".to_string(),
        }
    }
}

/// The `reqwest`-backed [`CatalogApi`] implementation
///
/// Stateless apart from the connection pool inside `reqwest::Client`;
/// cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    /// Shared HTTP client with timeout and user agent applied
    http: Client,
    /// Base URL with any trailing slash removed
    base_url: String,
}

impl HttpCatalogClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] when the underlying HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client that reuses an existing `reqwest::Client`
    ///
    /// Used by [`crate::AuthClient`] so auth and catalog calls share one
    /// connection pool.
    #[inline]
    #[must_use]
    pub(crate) fn with_http(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn image_part(image: &ImageFile) -> Result<Part, ApiError> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        Ok(part)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
        filter: Option<&str>,
    ) -> Result<CatalogPage, ApiError> {
        tracing::debug!(page, page_size, filter = filter.unwrap_or(""), "listing products");

        let mut params = vec![
            ("page".to_string(), page.to_string()),
            ("pageSize".to_string(), page_size.to_string()),
        ];
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            params.push(("filter".to_string(), filter.to_string()));
        }

        let response = self
            .http
            .get(self.url("/products"))
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;
        let envelope: ListEnvelope = decode(require_success(response).await?).await?;
        Ok(CatalogPage {
            items: envelope.data,
            meta: envelope.meta,
        })
    }

    async fn fetch_one(&self, token: &str, id: &ProductId) -> Result<Product, ApiError> {
        tracing::debug!(product = %id, "fetching product detail");

        let response = self
            .http
            .get(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id.clone()));
        }
        let envelope: ProductEnvelope = decode(require_success(response).await?).await?;
        Ok(envelope.data)
    }

    async fn create(
        &self,
        token: &str,
        fields: &ProductFields,
        image: &ImageFile,
    ) -> Result<ProductId, ApiError> {
        tracing::debug!(title = %fields.title, image = %image.file_name, "creating product");

        let form = Form::new()
            .text("title", fields.title.clone())
            .text("description", fields.description.clone())
            .part("thumbnail", Self::image_part(image)?);

        let response = self
            .http
            .post(self.url("/products"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let ack: Ack = decode(require_success(response).await?).await?;
        match ack.id {
            Some(id) => Ok(ProductId::new(id)),
            // A 2xx create without an id leaves us no record to fetch
            None => Err(ApiError::Server {
                status: status.as_u16(),
                message: "create acknowledged without a product id".to_string(),
            }),
        }
    }

    async fn update_fields(
        &self,
        token: &str,
        id: &ProductId,
        fields: &ProductFields,
    ) -> Result<(), ApiError> {
        tracing::debug!(product = %id, "updating product fields");

        let response = self
            .http
            .put(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .json(fields)
            .send()
            .await?;
        require_success(response).await?;
        Ok(())
    }

    async fn replace_image(
        &self,
        token: &str,
        id: &ProductId,
        image: &ImageFile,
    ) -> Result<(), ApiError> {
        tracing::debug!(product = %id, image = %image.file_name, "replacing product image");

        let form = Form::new().part("thumbnail", Self::image_part(image)?);
        let response = self
            .http
            .patch(self.url(&format!("/products/thumbnail/{id}")))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        require_success(response).await?;
        Ok(())
    }

    async fn delete(&self, token: &str, id: &ProductId) -> Result<(), ApiError> {
        tracing::debug!(product = %id, "deleting product");

        let response = self
            .http
            .delete(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        require_success(response).await?;
        Ok(())
    }
}

/// Map non-2xx statuses into the error taxonomy
async fn require_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<Ack>(&body).ok())
        .map(|ack| ack.message)
        .unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Decode a 2xx body, surfacing decode failures distinctly
async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ClientConfig::new();
        assert_eq!(config.timeout_ms, 10_000);
        assert!(config.base_url.starts_with("https://"));
    }

    #[test]
    fn config_builder() {
        let config = ClientConfig::new()
            .with_base_url("http://localhost:9000/")
            .with_timeout_ms(500);
        let client = HttpCatalogClient::new(config).unwrap();
        assert_eq!(client.url("/products"), "http://localhost:9000/products");
    }

    #[test]
    fn url_joins_id_paths() {
        let client =
            HttpCatalogClient::new(ClientConfig::new().with_base_url("http://localhost:9000"))
                .unwrap();
        let id = ProductId::from("p1");
        assert_eq!(
            client.url(&format!("/products/thumbnail/{id}")),
            "http://localhost:9000/products/thumbnail/p1"
        );
    }

    #[test]
    fn image_part_accepts_allowlisted_mime() {
        let image = ImageFile::new("a.webp", "image/webp", vec![0u8; 8]);
        assert!(HttpCatalogClient::image_part(&image).is_ok());
    }
}
