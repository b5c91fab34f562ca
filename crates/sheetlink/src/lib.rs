//! sheetlink: row-oriented access to remote spreadsheet ranges
//!
//! Maps between a remote tabular store (a spreadsheet addressed by id and
//! A1-style range) and row records that carry their own write-back address.
//!
//! # Architecture
//!
//! ```text
//! caller
//!   |
//! SheetStore (header skip, empty-result policy, error mapping)
//!   |
//! SheetTransport (read / append / overwrite / clear on raw grids)
//!   |
//! remote store
//! ```
//!
//! The HTTP implementation of [`SheetTransport`] lives in `sheetlink-http`.

pub mod cell;
pub mod error;
pub mod location;
pub mod row;
pub mod store;
pub mod transport;

pub use cell::{CellValue, Grid};
pub use error::{FailureKind, Operation, Result, SheetError};
pub use location::{qualify, Location};
pub use row::RowRecord;
pub use store::{SheetStore, Spreadsheet};
pub use transport::{BoxError, RangeUpdate, SheetTransport};
