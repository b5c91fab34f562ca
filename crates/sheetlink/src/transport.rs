//! Transport seam between the façade and the remote store.

use async_trait::async_trait;

use crate::cell::Grid;
use crate::location::Location;

/// Boxed error used where the concrete failure type is erased.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One range of a batch overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeUpdate {
    pub range: String,
    pub grid: Grid,
}

impl RangeUpdate {
    pub fn new(range: impl Into<String>, grid: Grid) -> Self {
        Self {
            range: range.into(),
            grid,
        }
    }
}

/// Primitive operations against a remote tabular store.
///
/// Implementations work purely on raw grids: no header handling, no row
/// addressing. Failures are returned as-is; the façade is the only place they
/// get translated.
///
/// Writes interpret values as if typed by a user, so formulas and typed
/// literals are parsed by the store rather than stored as text.
#[async_trait]
pub trait SheetTransport: Send + Sync {
    /// Error raised when a remote call cannot complete.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the grid at `location`. `None` when the range holds no values.
    async fn read(&self, location: &Location) -> Result<Option<Grid>, Self::Error>;

    /// Insert `grid` as new rows after the last populated row of the range.
    async fn append(&self, location: &Location, grid: Grid) -> Result<(), Self::Error>;

    /// Replace the cells addressed by `location` with `grid`.
    async fn overwrite(&self, location: &Location, grid: Grid) -> Result<(), Self::Error>;

    /// Remove all values in the range, keeping formatting and structure.
    async fn clear(&self, location: &Location) -> Result<(), Self::Error>;

    /// Overwrite several ranges of one store in a single call.
    async fn batch_overwrite(
        &self,
        store_id: &str,
        updates: Vec<RangeUpdate>,
    ) -> Result<(), Self::Error>;
}
