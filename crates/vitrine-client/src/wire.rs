//! Wire envelopes for the remote API
//!
//! The API wraps payloads in `{data}` / `{data, meta}` envelopes and
//! acknowledges writes with `{codeIntern, message, id?}`. These wrappers
//! stay private to this crate; the rest of the workspace sees only the
//! domain types.

use serde::Deserialize;
use vitrine_model::{Identity, PageMeta, Product};

/// `GET /products` response
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    pub(crate) data: Vec<Product>,
    pub(crate) meta: PageMeta,
}

/// `GET /products/{id}` response
#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub(crate) data: Product,
}

/// Write acknowledgement
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Ack {
    #[serde(rename = "codeIntern", default)]
    #[allow(dead_code)]
    pub(crate) code_intern: String,
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) id: Option<String>,
}

/// `POST /auth/login`, `POST /users`, `POST /auth/session` response
#[derive(Debug, Deserialize)]
pub(crate) struct AuthEnvelope {
    pub(crate) token: String,
    pub(crate) user: Identity,
}
