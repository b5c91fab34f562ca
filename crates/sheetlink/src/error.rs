//! Error types for sheetlink

use std::fmt;

use thiserror::Error;

use crate::transport::BoxError;

/// Result type alias for façade operations
pub type Result<T> = std::result::Result<T, SheetError>;

/// What kind of underlying failure a [`SheetError`] wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A remote call failed (network, permission, not found, server error)
    Transport,
    /// The transport or its authorization could not be built
    Construction,
}

/// Façade operation that was running when a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Retrieve,
    Add,
    Modify,
    Reset,
    ModifyRows,
}

impl Operation {
    /// Phrase used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::Retrieve => "retrieve sheet data",
            Operation::Add => "append rows",
            Operation::Modify => "update row",
            Operation::Reset => "clear values",
            Operation::ModifyRows => "update rows",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The single error surfaced by [`SheetStore`](crate::SheetStore).
///
/// Always carries a readable message and the original failure as its source.
/// An empty read is not an error; it is reported as `Ok(None)`.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SheetError {
    message: String,
    kind: FailureKind,
    #[source]
    source: BoxError,
}

impl SheetError {
    /// Wrap a failed remote call.
    pub fn transport(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            kind: FailureKind::Transport,
            source: source.into(),
        }
    }

    /// Wrap a failure to build the transport or its authorization.
    pub fn construction(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            kind: FailureKind::Construction,
            source: source.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn is_transport(&self) -> bool {
        self.kind == FailureKind::Transport
    }

    pub fn is_construction(&self) -> bool {
        self.kind == FailureKind::Construction
    }

    /// The wrapped failure, downcast to a concrete type.
    pub fn source_as<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}

/// Map a transport failure during `op` on `range` to a [`SheetError`].
pub fn transport_failure<E>(op: Operation, range: &str, err: E) -> SheetError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SheetError::transport(format!("Failed to {} for range: {}", op, range), err)
}
