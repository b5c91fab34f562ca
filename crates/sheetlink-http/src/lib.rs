//! sheetlink-http: Google Sheets v4 transport
//!
//! Implements [`sheetlink::SheetTransport`] over the Sheets REST API using a
//! connection-pooled reqwest client.
//!
//! # Architecture
//!
//! - `SheetsHttpClient`: the transport, one HTTP round trip per operation
//! - `SheetsClientConfig`: base URL, timeouts, pooling, render option
//! - `Authorizer`: opaque source of the `Authorization` header
//! - `wire`: `ValueRange` JSON shapes and cell conversions
//!
//! Credential loading is left to the caller; anything that can produce a header
//! value can implement [`Authorizer`].

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use auth::{Authorizer, BearerToken};
pub use client::{connect, SheetsHttpClient};
pub use config::{SheetsClientConfig, ValueRenderOption};
pub use error::{HttpError, HttpErrorCategory, HttpResult};
