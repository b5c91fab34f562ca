//! Authorization seam.
//!
//! The transport asks an [`Authorizer`] for an `Authorization` header value on
//! every request and never looks inside it. How the value is obtained (service
//! account, OAuth refresh, a fixed token) is up to the implementation.

use async_trait::async_trait;
use sheetlink::BoxError;
use std::fmt;

/// Produces the `Authorization` header for each request.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorization(&self) -> Result<String, BoxError>;
}

/// A fixed OAuth 2.0 access token sent as `Bearer <token>`.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl Authorizer for BearerToken {
    async fn authorization(&self) -> Result<String, BoxError> {
        if self.token.trim().is_empty() {
            return Err("bearer token is empty".into());
        }
        Ok(format!("Bearer {}", self.token))
    }
}
