//! HTTP error types and handling

use sheetlink::BoxError;
use thiserror::Error;

/// Errors raised by the Sheets HTTP transport
#[derive(Error, Debug)]
pub enum HttpError {
    /// Connection failed (DNS, TCP, TLS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The authorizer could not produce a header value
    #[error("Authorization error: {0}")]
    Authorization(#[source] BoxError),

    /// The store answered with a non-success status
    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// URL could not be built from the base URL and range
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic reqwest error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parse error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

/// Error category for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorCategory {
    /// Connection-related errors (DNS, TCP, TLS)
    Connection,
    /// Timeout errors
    Timeout,
    /// Missing or rejected credentials (401, 403)
    Permission,
    /// Spreadsheet or range does not exist (404)
    NotFound,
    /// Invalid request construction
    Request,
    /// Response parsing or other status errors
    Response,
    /// Unknown/other errors
    Unknown,
}

impl HttpError {
    /// Categorize the error for reporting
    pub fn category(&self) -> HttpErrorCategory {
        match self {
            HttpError::Connection(_) => HttpErrorCategory::Connection,
            HttpError::Timeout(_) => HttpErrorCategory::Timeout,
            HttpError::Authorization(_) => HttpErrorCategory::Permission,
            HttpError::Api { status, .. } => match *status {
                401 | 403 => HttpErrorCategory::Permission,
                404 => HttpErrorCategory::NotFound,
                408 => HttpErrorCategory::Timeout,
                400..=499 => HttpErrorCategory::Request,
                _ => HttpErrorCategory::Response,
            },
            HttpError::InvalidUrl(_) | HttpError::UrlParse(_) => HttpErrorCategory::Request,
            HttpError::Json(_) => HttpErrorCategory::Response,
            HttpError::Reqwest(e) => {
                if e.is_connect() {
                    HttpErrorCategory::Connection
                } else if e.is_timeout() {
                    HttpErrorCategory::Timeout
                } else if e.is_request() || e.is_builder() {
                    HttpErrorCategory::Request
                } else if e.is_decode() || e.is_body() {
                    HttpErrorCategory::Response
                } else {
                    HttpErrorCategory::Unknown
                }
            }
        }
    }

    /// Status code reported by the store, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Sanitize error message (remove sensitive info like credentials, internal IPs)
    pub fn sanitized_message(&self) -> String {
        let msg = self.to_string();
        sanitize_error_message(&msg)
    }
}

/// Sanitize error messages by removing sensitive information
fn sanitize_error_message(msg: &str) -> String {
    use regex::Regex;
    use std::sync::OnceLock;

    static URL_CREDS_RE: OnceLock<Regex> = OnceLock::new();
    static INTERNAL_IP_RE: OnceLock<Regex> = OnceLock::new();
    static BEARER_RE: OnceLock<Regex> = OnceLock::new();
    static KEY_RE: OnceLock<Regex> = OnceLock::new();

    let url_creds_re = URL_CREDS_RE
        .get_or_init(|| Regex::new(r"https?://[^@:/]+:[^@/]+@").expect("valid regex"));
    let internal_ip_re = INTERNAL_IP_RE.get_or_init(|| {
        Regex::new(r"\b(10\.|172\.(1[6-9]|2[0-9]|3[01])\.|192\.168\.)\d+\.\d+\b")
            .expect("valid regex")
    });
    let bearer_re = BEARER_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(authorization:\s*bearer|bearer)\s+[^\s&]+").expect("valid regex")
    });
    // Key and token forms need an explicit separator so sheet names like `Keys!A1` survive
    let key_re = KEY_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(access_token|api[_-]?key|key|token)\s*[:=]\s*[^\s&]+")
            .expect("valid regex")
    });

    let sanitized = url_creds_re.replace_all(msg, "https://[REDACTED]@");
    let sanitized = internal_ip_re.replace_all(&sanitized, "[INTERNAL_IP]");
    let sanitized = bearer_re.replace_all(&sanitized, "$1 [REDACTED]");
    let sanitized = key_re.replace_all(&sanitized, "$1=[REDACTED]");

    sanitized.to_string()
}
