//! Row-oriented façade over a [`SheetTransport`].
//!
//! [`SheetStore`] is the entry point application code calls. It converts raw
//! grids into [`RowRecord`]s, treats the first row of every read as a header,
//! reports empty ranges as `Ok(None)`, and maps every transport failure to a
//! [`SheetError`] through [`transport_failure`]. Nothing is cached and nothing is
//! retried: each call is exactly one remote round trip.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::cell::Grid;
use crate::error::{transport_failure, Operation, Result, SheetError};
use crate::location::{qualify, Location};
use crate::row::RowRecord;
use crate::transport::{RangeUpdate, SheetTransport};

/// Data façade over an injected transport.
///
/// # Example
///
/// ```ignore
/// use sheetlink::{Location, SheetStore};
/// use sheetlink_http::{BearerToken, SheetsClientConfig, SheetsHttpClient};
///
/// let client = SheetsHttpClient::new(SheetsClientConfig::default(), BearerToken::new(token))?;
/// let store = SheetStore::new(client);
///
/// if let Some(rows) = store.retrieve(&Location::new(id, "Tasks!A1:D")).await? {
///     for row in rows {
///         println!("{} -> {:?}", row.start_range(), row.cells());
///     }
/// }
/// ```
pub struct SheetStore<T> {
    transport: Arc<T>,
}

impl<T> Clone for SheetStore<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for SheetStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetStore")
            .field("transport", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: SheetTransport> SheetStore<T> {
    /// Create a façade owning `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a façade over a transport shared with other callers.
    pub fn from_shared(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// The injected transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Bind to one spreadsheet so operations can be addressed by range alone.
    pub fn spreadsheet(&self, store_id: impl Into<String>) -> Spreadsheet<'_, T> {
        Spreadsheet {
            store: self,
            store_id: store_id.into(),
        }
    }

    /// Read the data rows at `location`.
    ///
    /// Row 0 of the fetched grid is the header and is skipped; every other row
    /// becomes a [`RowRecord`] addressed by its position in the full grid, so the
    /// first data row is `A2`. Returns `Ok(None)` when the range holds no values.
    #[instrument(skip_all, fields(store_id = %location.store_id(), range = %location.range()))]
    pub async fn retrieve(&self, location: &Location) -> Result<Option<Vec<RowRecord>>> {
        let grid = self
            .transport
            .read(location)
            .await
            .map_err(|e| failed(Operation::Retrieve, location.range(), e))?;

        let rows = match grid {
            Some(grid) if !grid.is_empty() => into_records(grid),
            _ => {
                debug!("Range is empty");
                return Ok(None);
            }
        };

        debug!(rows = rows.len(), "Retrieved data rows");
        Ok(Some(rows))
    }

    /// Append `rows` after the last populated row of the range.
    ///
    /// Only `cells` are written; `start_range` plays no part in an append.
    #[instrument(skip_all, fields(store_id = %location.store_id(), range = %location.range(), row_count = rows.len()))]
    pub async fn add(&self, location: &Location, rows: &[RowRecord]) -> Result<()> {
        if rows.is_empty() {
            debug!("Nothing to append");
            return Ok(());
        }

        self.transport
            .append(location, flatten(rows))
            .await
            .map_err(|e| failed(Operation::Add, location.range(), e))
    }

    /// Overwrite the cells at `location` with a single row.
    #[instrument(skip_all, fields(store_id = %location.store_id(), range = %location.range()))]
    pub async fn modify(&self, location: &Location, row: &RowRecord) -> Result<()> {
        self.transport
            .overwrite(location, vec![row.cells().to_vec()])
            .await
            .map_err(|e| failed(Operation::Modify, location.range(), e))
    }

    /// Clear all values at `location`.
    #[instrument(skip_all, fields(store_id = %location.store_id(), range = %location.range()))]
    pub async fn reset(&self, location: &Location) -> Result<()> {
        self.transport
            .clear(location)
            .await
            .map_err(|e| failed(Operation::Reset, location.range(), e))
    }

    /// Write previously retrieved rows back to where they came from.
    ///
    /// Each row targets `sheet!start_range` and all rows go out in one batch.
    #[instrument(skip_all, fields(store_id = %store_id, sheet = %sheet, row_count = rows.len()))]
    pub async fn modify_rows(&self, store_id: &str, sheet: &str, rows: &[RowRecord]) -> Result<()> {
        if rows.is_empty() {
            debug!("Nothing to update");
            return Ok(());
        }

        let updates: Vec<RangeUpdate> = rows
            .iter()
            .map(|row| RangeUpdate::new(qualify(sheet, row.start_range()), vec![row.cells().to_vec()]))
            .collect();
        let ranges = updates
            .iter()
            .map(|u| u.range.as_str())
            .collect::<Vec<_>>()
            .join(",");

        self.transport
            .batch_overwrite(store_id, updates)
            .await
            .map_err(|e| failed(Operation::ModifyRows, &ranges, e))
    }
}

/// A [`SheetStore`] bound to one spreadsheet.
#[derive(Debug)]
pub struct Spreadsheet<'a, T> {
    store: &'a SheetStore<T>,
    store_id: String,
}

impl<T: SheetTransport> Spreadsheet<'_, T> {
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Location for `range` in this spreadsheet.
    pub fn location(&self, range: &str) -> Location {
        Location::new(self.store_id.clone(), range)
    }

    pub async fn retrieve(&self, range: &str) -> Result<Option<Vec<RowRecord>>> {
        self.store.retrieve(&self.location(range)).await
    }

    pub async fn add(&self, range: &str, rows: &[RowRecord]) -> Result<()> {
        self.store.add(&self.location(range), rows).await
    }

    pub async fn modify(&self, range: &str, row: &RowRecord) -> Result<()> {
        self.store.modify(&self.location(range), row).await
    }

    pub async fn reset(&self, range: &str) -> Result<()> {
        self.store.reset(&self.location(range)).await
    }

    pub async fn modify_rows(&self, sheet: &str, rows: &[RowRecord]) -> Result<()> {
        self.store.modify_rows(&self.store_id, sheet, rows).await
    }
}

/// Skip the header row and address every remaining row by its grid index.
fn into_records(grid: Grid) -> Vec<RowRecord> {
    grid.into_iter()
        .enumerate()
        .skip(1)
        .map(|(index, cells)| RowRecord::new(cells, index))
        .collect()
}

fn flatten(rows: &[RowRecord]) -> Grid {
    rows.iter().map(|row| row.cells().to_vec()).collect()
}

fn failed<E>(op: Operation, range: &str, err: E) -> SheetError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let err = transport_failure(op, range, err);
    warn!(error = %err, "Transport call failed");
    err
}
