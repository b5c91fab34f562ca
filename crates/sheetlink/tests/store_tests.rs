//! Façade behaviour against a scripted in-process transport.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sheetlink::{
    CellValue, FailureKind, Grid, Location, RangeUpdate, RowRecord, SheetStore, SheetTransport,
};

// ============================================================================
// Fake transport
// ============================================================================

/// What `read` hands back.
enum ReadReply {
    Absent,
    Grid(Grid),
    /// Serve whatever has been appended so far
    Stored,
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Read(Location),
    Append(Location, Grid),
    Overwrite(Location, Grid),
    Clear(Location),
    Batch(String, Vec<RangeUpdate>),
}

struct FakeTransport {
    reply: ReadReply,
    stored: Mutex<Grid>,
    calls: Mutex<Vec<Call>>,
    fail_with: Option<io::ErrorKind>,
    attempts: AtomicUsize,
}

impl FakeTransport {
    fn new(reply: ReadReply) -> Self {
        Self {
            reply,
            stored: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail_with: None,
            attempts: AtomicUsize::new(0),
        }
    }

    fn failing(kind: io::ErrorKind) -> Self {
        Self {
            fail_with: Some(kind),
            ..Self::new(ReadReply::Absent)
        }
    }

    fn with_stored(self, grid: Grid) -> Self {
        *self.stored.lock() = grid;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(call);
        match self.fail_with {
            Some(kind) => Err(io::Error::new(kind, "remote call failed")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SheetTransport for FakeTransport {
    type Error = io::Error;

    async fn read(&self, location: &Location) -> io::Result<Option<Grid>> {
        self.record(Call::Read(location.clone()))?;
        Ok(match &self.reply {
            ReadReply::Absent => None,
            ReadReply::Grid(grid) => Some(grid.clone()),
            ReadReply::Stored => Some(self.stored.lock().clone()),
        })
    }

    async fn append(&self, location: &Location, grid: Grid) -> io::Result<()> {
        self.record(Call::Append(location.clone(), grid.clone()))?;
        self.stored.lock().extend(grid);
        Ok(())
    }

    async fn overwrite(&self, location: &Location, grid: Grid) -> io::Result<()> {
        self.record(Call::Overwrite(location.clone(), grid))
    }

    async fn clear(&self, location: &Location) -> io::Result<()> {
        self.record(Call::Clear(location.clone()))?;
        self.stored.lock().clear();
        Ok(())
    }

    async fn batch_overwrite(&self, store_id: &str, updates: Vec<RangeUpdate>) -> io::Result<()> {
        self.record(Call::Batch(store_id.to_string(), updates))
    }
}

fn text_row(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::from(*v)).collect()
}

fn location() -> Location {
    Location::new("sheet-123", "Sheet1!A1:D10")
}

// ============================================================================
// retrieve
// ============================================================================

#[tokio::test]
async fn test_retrieve_skips_header_and_addresses_rows() {
    let grid = vec![
        text_row(&["h1", "h2"]),
        text_row(&["a", "b"]),
        text_row(&["c", "d"]),
    ];
    let store = SheetStore::new(FakeTransport::new(ReadReply::Grid(grid)));

    let rows = store.retrieve(&location()).await.unwrap().expect("rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cells(), text_row(&["a", "b"]).as_slice());
    assert_eq!(rows[0].start_range(), "A2");
    assert_eq!(rows[1].cells(), text_row(&["c", "d"]).as_slice());
    assert_eq!(rows[1].start_range(), "A3");
}

#[tokio::test]
async fn test_retrieve_yields_n_minus_one_rows() {
    for n in 1..=12usize {
        let grid: Grid = (0..n)
            .map(|i| vec![CellValue::from(format!("r{}", i))])
            .collect();
        let store = SheetStore::new(FakeTransport::new(ReadReply::Grid(grid)));

        let rows = store.retrieve(&location()).await.unwrap().expect("rows");
        assert_eq!(rows.len(), n - 1);
        for (offset, row) in rows.iter().enumerate() {
            let i = offset + 1;
            assert_eq!(row.start_range(), format!("A{}", i + 1));
            assert_eq!(row.cells(), &[CellValue::from(format!("r{}", i))]);
        }
    }
}

#[tokio::test]
async fn test_retrieve_absent_grid_is_none() {
    let store = SheetStore::new(FakeTransport::new(ReadReply::Absent));
    assert!(store.retrieve(&location()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_retrieve_zero_row_grid_is_none() {
    let store = SheetStore::new(FakeTransport::new(ReadReply::Grid(Vec::new())));
    assert!(store.retrieve(&location()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_retrieve_header_only_is_empty_list() {
    let store = SheetStore::new(FakeTransport::new(ReadReply::Grid(vec![text_row(&["h1"])])));
    let rows = store.retrieve(&location()).await.unwrap();
    assert_eq!(rows, Some(Vec::new()));
}

#[tokio::test]
async fn test_retrieve_keeps_short_rows_unpadded() {
    let grid = vec![
        text_row(&["h1", "h2", "h3"]),
        text_row(&["only"]),
        vec![CellValue::from("a"), CellValue::Empty, CellValue::Number(3.0)],
    ];
    let store = SheetStore::new(FakeTransport::new(ReadReply::Grid(grid)));

    let rows = store.retrieve(&location()).await.unwrap().expect("rows");
    assert_eq!(rows[0].cells().len(), 1);
    assert_eq!(rows[1].cells()[1], CellValue::Empty);
}

#[tokio::test]
async fn test_retrieve_failure_mentions_range() {
    let _ = tracing_subscriber::fmt::try_init();

    let transport = Arc::new(FakeTransport::failing(io::ErrorKind::ConnectionRefused));
    let store = SheetStore::from_shared(Arc::clone(&transport));

    let err = store.retrieve(&location()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(err.to_string().contains("Sheet1!A1:D10"));
    let cause = err.source_as::<io::Error>().expect("io cause");
    assert_eq!(cause.kind(), io::ErrorKind::ConnectionRefused);
    assert_eq!(transport.attempts(), 1);
}

// ============================================================================
// add / modify / reset
// ============================================================================

#[tokio::test]
async fn test_add_flattens_cells_and_ignores_start_range() {
    let transport = Arc::new(FakeTransport::new(ReadReply::Absent));
    let store = SheetStore::from_shared(Arc::clone(&transport));

    let rows = vec![
        RowRecord::new(text_row(&["a", "b"]), 5),
        RowRecord::from(vec![CellValue::Bool(true), CellValue::Number(2.5)]).with_start_range("Z1"),
    ];
    store.add(&location(), &rows).await.unwrap();

    assert_eq!(
        transport.calls(),
        vec![Call::Append(
            location(),
            vec![
                text_row(&["a", "b"]),
                vec![CellValue::Bool(true), CellValue::Number(2.5)],
            ],
        )]
    );
}

#[tokio::test]
async fn test_add_nothing_makes_no_call() {
    let transport = Arc::new(FakeTransport::new(ReadReply::Absent));
    let store = SheetStore::from_shared(Arc::clone(&transport));

    store.add(&location(), &[]).await.unwrap();
    assert_eq!(transport.attempts(), 0);
}

#[tokio::test]
async fn test_modify_sends_single_row() {
    let transport = Arc::new(FakeTransport::new(ReadReply::Absent));
    let store = SheetStore::from_shared(Arc::clone(&transport));
    let target = Location::new("sheet-123", "Sheet1!A3");

    store
        .modify(&target, &RowRecord::new(text_row(&["x", "y"]), 2))
        .await
        .unwrap();

    assert_eq!(
        transport.calls(),
        vec![Call::Overwrite(target, vec![text_row(&["x", "y"])])]
    );
}

#[tokio::test]
async fn test_reset_clears_location() {
    let transport = Arc::new(
        FakeTransport::new(ReadReply::Stored).with_stored(vec![text_row(&["h"]), text_row(&["v"])]),
    );
    let store = SheetStore::from_shared(Arc::clone(&transport));

    store.reset(&location()).await.unwrap();
    assert_eq!(transport.calls(), vec![Call::Clear(location())]);
    assert!(store.retrieve(&location()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_write_failures_are_wrapped_without_retry() {
    let transport = Arc::new(FakeTransport::failing(io::ErrorKind::PermissionDenied));
    let store = SheetStore::from_shared(Arc::clone(&transport));
    let row = RowRecord::new(text_row(&["a"]), 1);

    let err = store.add(&location(), &[row.clone()]).await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.message().contains("Sheet1!A1:D10"));
    assert_eq!(transport.attempts(), 1);

    let err = store.modify(&location(), &row).await.unwrap_err();
    assert!(err.message().contains("Sheet1!A1:D10"));
    assert_eq!(transport.attempts(), 2);

    let err = store.reset(&location()).await.unwrap_err();
    assert!(err.message().contains("Sheet1!A1:D10"));
    assert_eq!(
        err.source_as::<io::Error>().map(|e| e.kind()),
        Some(io::ErrorKind::PermissionDenied)
    );
    assert_eq!(transport.attempts(), 3);
}

// ============================================================================
// Round trip and write-back
// ============================================================================

#[tokio::test]
async fn test_add_then_retrieve_preserves_types_and_order() {
    let header = text_row(&["name", "active", "score", "note"]);
    let transport =
        Arc::new(FakeTransport::new(ReadReply::Stored).with_stored(vec![header]));
    let store = SheetStore::from_shared(Arc::clone(&transport));

    let written = vec![
        RowRecord::from(vec![
            CellValue::from("alice"),
            CellValue::Bool(true),
            CellValue::Number(91.5),
            CellValue::Empty,
        ]),
        RowRecord::from(vec![
            CellValue::from("42"),
            CellValue::Bool(false),
            CellValue::Number(42.0),
            CellValue::from("n/a"),
        ]),
    ];
    store.add(&location(), &written).await.unwrap();

    let read = store.retrieve(&location()).await.unwrap().expect("rows");
    assert_eq!(read.len(), 2);
    for (original, fetched) in written.iter().zip(&read) {
        assert_eq!(original.cells(), fetched.cells());
    }
    assert_eq!(read[1].cells()[0].as_str(), Some("42"));
    assert_eq!(read[1].cells()[2].as_number(), Some(42.0));
}

#[tokio::test]
async fn test_modify_rows_targets_start_ranges() {
    let grid = vec![
        text_row(&["h1", "h2"]),
        text_row(&["a", "b"]),
        text_row(&["c", "d"]),
    ];
    let transport = Arc::new(FakeTransport::new(ReadReply::Grid(grid)));
    let store = SheetStore::from_shared(Arc::clone(&transport));

    let mut rows = store.retrieve(&location()).await.unwrap().expect("rows");
    rows[1].cells_mut()[1] = CellValue::from("changed");

    store.modify_rows("sheet-123", "My Data", &rows).await.unwrap();

    let calls = transport.calls();
    assert_eq!(
        calls.last(),
        Some(&Call::Batch(
            "sheet-123".to_string(),
            vec![
                RangeUpdate::new("'My Data'!A2", vec![text_row(&["a", "b"])]),
                RangeUpdate::new("'My Data'!A3", vec![text_row(&["c", "changed"])]),
            ],
        ))
    );
}

#[tokio::test]
async fn test_modify_rows_failure_lists_ranges() {
    let store = SheetStore::new(FakeTransport::failing(io::ErrorKind::TimedOut));
    let rows = vec![RowRecord::new(text_row(&["a"]), 1), RowRecord::new(text_row(&["b"]), 4)];

    let err = store.modify_rows("sheet-123", "Sheet1", &rows).await.unwrap_err();
    assert!(err.message().contains("Sheet1!A2"));
    assert!(err.message().contains("Sheet1!A5"));
}

#[tokio::test]
async fn test_spreadsheet_handle_binds_store_id() {
    let transport = Arc::new(FakeTransport::new(ReadReply::Absent));
    let store = SheetStore::from_shared(Arc::clone(&transport));
    let sheet = store.spreadsheet("bound-id");

    assert_eq!(sheet.store_id(), "bound-id");
    assert!(sheet.retrieve("Tasks!A1:C").await.unwrap().is_none());
    sheet.reset("Tasks!A5:C5").await.unwrap();

    assert_eq!(
        transport.calls(),
        vec![
            Call::Read(Location::new("bound-id", "Tasks!A1:C")),
            Call::Clear(Location::new("bound-id", "Tasks!A5:C5")),
        ]
    );
}
