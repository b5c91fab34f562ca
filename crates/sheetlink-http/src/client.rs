//! Sheets values API client with connection pooling

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use sheetlink::{Grid, Location, RangeUpdate, SheetError, SheetStore, SheetTransport};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::auth::Authorizer;
use crate::config::SheetsClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::wire::{
    api_error, BatchUpdateValuesRequest, ValueRange, INSERT_ROWS, MAJOR_DIMENSION_ROWS,
    USER_ENTERED,
};

/// Transport over the Sheets v4 values endpoints
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```ignore
/// use sheetlink::{Location, SheetStore};
/// use sheetlink_http::{BearerToken, SheetsClientConfig, SheetsHttpClient};
///
/// let client = SheetsHttpClient::new(SheetsClientConfig::new(), BearerToken::new(token))?;
/// let store = SheetStore::new(client);
/// let rows = store.retrieve(&Location::new(spreadsheet_id, "Sheet1!A1:D")).await?;
/// ```
#[derive(Clone)]
pub struct SheetsHttpClient {
    inner: Arc<SheetsHttpClientInner>,
}

struct SheetsHttpClientInner {
    client: reqwest::Client,
    config: SheetsClientConfig,
    base_url: Url,
    authorizer: Box<dyn Authorizer>,
}

impl SheetsHttpClient {
    /// Create a new client with the given configuration and authorizer
    pub fn new(config: SheetsClientConfig, authorizer: impl Authorizer + 'static) -> HttpResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(config.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .brotli(config.brotli)
            .build()?;

        Ok(Self {
            inner: Arc::new(SheetsHttpClientInner {
                client,
                config,
                base_url,
                authorizer: Box::new(authorizer),
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &SheetsClientConfig {
        &self.inner.config
    }

    /// `{base}/spreadsheets/{store_id}/{tail...}` with each part percent-encoded
    fn endpoint(&self, store_id: &str, tail: &[&str]) -> HttpResult<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HttpError::InvalidUrl(self.inner.config.base_url.clone()))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(store_id)
            .extend(tail);
        Ok(url)
    }

    fn values_url(&self, location: &Location, suffix: &str) -> HttpResult<Url> {
        let segment = format!("{}{}", location.range(), suffix);
        self.endpoint(location.store_id(), &["values", segment.as_str()])
    }

    /// Authorize, send, and turn non-2xx responses into [`HttpError::Api`]
    async fn send(&self, request: reqwest::RequestBuilder) -> HttpResult<reqwest::Response> {
        let header = self
            .inner
            .authorizer
            .authorization()
            .await
            .map_err(HttpError::Authorization)?;

        let request = request.header(AUTHORIZATION, header).build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let start = Instant::now();
        let response = match self.inner.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = classify(e);
                warn!(%method, %path, error = %err.sanitized_message(), "Sheets API call failed");
                return Err(err);
            }
        };
        let latency_ms = start.elapsed().as_millis() as u64;

        let status = response.status();
        debug!(%method, %path, status = status.as_u16(), latency_ms, "Sheets API call");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(classify)?;
        let err = api_error(status.as_u16(), &body);
        warn!(%method, %path, error = %err.sanitized_message(), "Sheets API rejected request");
        Err(err)
    }
}

/// Pull connect and timeout failures out of the generic reqwest error
fn classify(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else if err.is_connect() {
        HttpError::Connection(err.to_string())
    } else {
        HttpError::Reqwest(err)
    }
}

#[async_trait]
impl SheetTransport for SheetsHttpClient {
    type Error = HttpError;

    async fn read(&self, location: &Location) -> HttpResult<Option<Grid>> {
        let url = self.values_url(location, "")?;
        let request = self.inner.client.get(url).query(&[
            ("majorDimension", MAJOR_DIMENSION_ROWS),
            (
                "valueRenderOption",
                self.inner.config.value_render_option.as_str(),
            ),
        ]);

        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(classify)?;
        let value_range: ValueRange = serde_json::from_slice(&body)
            .map_err(|e| HttpError::Json(format!("Failed to parse value range: {}", e)))?;
        value_range.into_grid()
    }

    async fn append(&self, location: &Location, grid: Grid) -> HttpResult<()> {
        let url = self.values_url(location, ":append")?;
        let body = ValueRange::rows(location.range(), &grid)?;
        let request = self
            .inner
            .client
            .post(url)
            .query(&[
                ("valueInputOption", USER_ENTERED),
                ("insertDataOption", INSERT_ROWS),
            ])
            .json(&body);

        self.send(request).await?;
        Ok(())
    }

    async fn overwrite(&self, location: &Location, grid: Grid) -> HttpResult<()> {
        let url = self.values_url(location, "")?;
        let body = ValueRange::rows(location.range(), &grid)?;
        let request = self
            .inner
            .client
            .put(url)
            .query(&[("valueInputOption", USER_ENTERED)])
            .json(&body);

        self.send(request).await?;
        Ok(())
    }

    async fn clear(&self, location: &Location) -> HttpResult<()> {
        let url = self.values_url(location, ":clear")?;
        let request = self.inner.client.post(url).json(&serde_json::json!({}));

        self.send(request).await?;
        Ok(())
    }

    async fn batch_overwrite(&self, store_id: &str, updates: Vec<RangeUpdate>) -> HttpResult<()> {
        let url = self.endpoint(store_id, &["values:batchUpdate"])?;
        let data = updates
            .iter()
            .map(|update| ValueRange::rows(update.range.clone(), &update.grid))
            .collect::<HttpResult<Vec<_>>>()?;
        let body = BatchUpdateValuesRequest {
            value_input_option: USER_ENTERED.to_string(),
            data,
        };

        self.send(self.inner.client.post(url).json(&body)).await?;
        Ok(())
    }
}

impl std::fmt::Debug for SheetsHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsHttpClient")
            .field("base_url", &self.inner.config.base_url)
            .field("timeout", &self.inner.config.timeout)
            .finish()
    }
}

/// Build the HTTP transport and wrap it in a [`SheetStore`].
///
/// A client that cannot be built is reported as a construction failure.
pub fn connect(
    config: SheetsClientConfig,
    authorizer: impl Authorizer + 'static,
) -> Result<SheetStore<SheetsHttpClient>, SheetError> {
    let base_url = config.base_url.clone();
    SheetsHttpClient::new(config, authorizer)
        .map(SheetStore::new)
        .map_err(|e| {
            SheetError::construction(
                format!("Failed to create the Sheets client for {}", base_url),
                e,
            )
        })
}
