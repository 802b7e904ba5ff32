//! Authentication API
//!
//! Login, registration, and session refresh against the same remote API.
//! Successful responses pair a bearer token with the user's identity; the
//! session context in `vitrine-sync` stores them together.

use crate::error::ApiError;
use crate::http::ClientConfig;
use crate::wire::AuthEnvelope;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vitrine_model::Identity;

/// A successful login/registration/refresh response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    /// Bearer token for subsequent authenticated calls
    pub token: String,
    /// Profile of the authenticated user
    pub identity: Identity,
}

/// Phone number as the registration endpoint expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Country code, e.g. `"55"`
    pub country: String,
    /// Area code
    pub ddd: String,
    /// Subscriber number
    pub number: String,
}

/// Registration payload for `POST /users`
///
/// Field-level validation (password length, matching confirmation, email
/// shape) is the presentation layer's job; the server re-validates anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub verify_password: String,
    pub phone: Phone,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the authentication endpoints
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client from configuration
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

    /// Build a catalog client sharing this client's connection pool
    #[inline]
    #[must_use]
    pub fn catalog_client(&self) -> crate::http::HttpCatalogClient {
        crate::http::HttpCatalogClient::with_http(self.http.clone(), &self.base_url)
    }

    /// Authenticate with email and password
    ///
    /// # Errors
    /// `Unauthorized` on rejected credentials, `Network`/`Server`/`Decode`
    /// as for any other call.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        tracing::info!(email, "logging in");
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginBody { email, password })
            .send()
            .await?;
        into_auth_response(response).await
    }

    /// Register a new account; the server signs the new user in directly
    ///
    /// # Errors
    /// As [`AuthClient::login`].
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        tracing::info!(email = %registration.email, "registering account");
        let response = self
            .http
            .post(format!("{}/users", self.base_url))
            .json(registration)
            .send()
            .await?;
        into_auth_response(response).await
    }

    /// Exchange a still-valid token for a fresh one
    ///
    /// # Errors
    /// `Unauthorized` when the token has already expired.
    pub async fn refresh_session(&self, token: &str) -> Result<AuthResponse, ApiError> {
        tracing::debug!("refreshing session token");
        let response = self
            .http
            .post(format!("{}/auth/session", self.base_url))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        into_auth_response(response).await
    }
}

async fn into_auth_response(response: Response) -> Result<AuthResponse, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<serde_json::Value>(&body).ok())
            .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_default();
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }
    let body = response.bytes().await?;
    let envelope: AuthEnvelope =
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
    Ok(AuthResponse {
        token: envelope.token,
        identity: envelope.user,
    })
}
