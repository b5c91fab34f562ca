//! Wire types of the Sheets values API

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sheetlink::{CellValue, Grid};

use crate::error::{HttpError, HttpResult};

/// Values are always exchanged row-major
pub const MAJOR_DIMENSION_ROWS: &str = "ROWS";

/// Writes are parsed as if typed into the UI
pub const USER_ENTERED: &str = "USER_ENTERED";

/// Appends insert new rows instead of overwriting below the table
pub const INSERT_ROWS: &str = "INSERT_ROWS";

/// A range of values, as read and written by the values endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,

    /// Absent when the range holds no values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<JsonValue>>>,
}

impl ValueRange {
    /// Row-major body for writing `grid` to `range`
    pub fn rows(range: impl Into<String>, grid: &Grid) -> HttpResult<Self> {
        Ok(Self {
            range: Some(range.into()),
            major_dimension: Some(MAJOR_DIMENSION_ROWS.to_string()),
            values: Some(grid_to_json(grid)?),
        })
    }

    /// Convert the returned values, keeping "no values" distinct from a grid
    pub fn into_grid(self) -> HttpResult<Option<Grid>> {
        self.values.map(grid_from_json).transpose()
    }
}

/// Body of `values:batchUpdate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateValuesRequest {
    pub value_input_option: String,
    pub data: Vec<ValueRange>,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Build an [`HttpError::Api`] from a failed response body.
///
/// Falls back to the raw body text when it is not the usual error envelope.
pub fn api_error(status: u16, body: &[u8]) -> HttpError {
    let message = match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(code) => format!("{} [{}]", parsed.error.message, code),
            None => parsed.error.message,
        },
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    };
    HttpError::Api { status, message }
}

/// Cell to JSON. `Empty` is sent as `""` so the target cell gets cleared.
pub fn cell_to_json(cell: &CellValue) -> HttpResult<JsonValue> {
    Ok(match cell {
        CellValue::Empty => JsonValue::String(String::new()),
        CellValue::Bool(b) => JsonValue::Bool(*b),
        CellValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .ok_or_else(|| HttpError::Json(format!("Cannot send non-finite number: {}", n)))?,
        CellValue::Text(s) => JsonValue::String(s.clone()),
    })
}

/// JSON to cell. Blank cells come back as `""` or `null`; both become `Empty`.
pub fn cell_from_json(value: JsonValue) -> HttpResult<CellValue> {
    match value {
        JsonValue::Null => Ok(CellValue::Empty),
        JsonValue::Bool(b) => Ok(CellValue::Bool(b)),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .ok_or_else(|| HttpError::Json(format!("Number out of range: {}", n))),
        JsonValue::String(s) if s.is_empty() => Ok(CellValue::Empty),
        JsonValue::String(s) => Ok(CellValue::Text(s)),
        other => Err(HttpError::Json(format!("Unexpected cell value: {}", other))),
    }
}

pub fn grid_to_json(grid: &Grid) -> HttpResult<Vec<Vec<JsonValue>>> {
    grid.iter()
        .map(|row| row.iter().map(cell_to_json).collect())
        .collect()
}

pub fn grid_from_json(values: Vec<Vec<JsonValue>>) -> HttpResult<Grid> {
    values
        .into_iter()
        .map(|row| row.into_iter().map(cell_from_json).collect())
        .collect()
}
