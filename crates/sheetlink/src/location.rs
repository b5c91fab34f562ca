//! Location descriptor: which store and which range an operation targets.

use std::fmt;

/// Identifies a spreadsheet and a range inside it.
///
/// Both fields are opaque to this crate; only the remote store validates them.
/// A location is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    store_id: String,
    range: String,
}

impl Location {
    /// Create a location for `range` (e.g. `"Sheet1!A1:D10"`) in spreadsheet `store_id`.
    pub fn new(store_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            range: range.into(),
        }
    }

    /// Spreadsheet identifier.
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Range expression understood by the remote store.
    pub fn range(&self) -> &str {
        &self.range
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Location{{store_id='{}', range='{}'}}",
            self.store_id, self.range
        )
    }
}

/// Qualify a cell or range with a sheet name in A1 notation.
///
/// Names containing anything other than ASCII alphanumerics or `_` are quoted,
/// with embedded single quotes doubled. An empty sheet name leaves `cell` as is.
pub fn qualify(sheet: &str, cell: &str) -> String {
    if sheet.is_empty() {
        return cell.to_string();
    }

    let plain = sheet
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        format!("{}!{}", sheet, cell)
    } else {
        format!("'{}'!{}", sheet.replace('\'', "''"), cell)
    }
}
