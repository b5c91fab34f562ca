//! Print the data rows of a range.
//!
//! ```text
//! SHEETLINK_TOKEN=ya29... SHEETLINK_SPREADSHEET_ID=1f5e... SHEETLINK_RANGE='Sheet1!A1:D' \
//!     cargo run -p sheetlink-http --example read_rows
//! ```

use sheetlink::Location;
use sheetlink_http::{connect, BearerToken, SheetsClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let token = std::env::var("SHEETLINK_TOKEN")?;
    let spreadsheet_id = std::env::var("SHEETLINK_SPREADSHEET_ID")?;
    let range = std::env::var("SHEETLINK_RANGE").unwrap_or_else(|_| "Sheet1!A1:Z".to_string());

    let store = connect(SheetsClientConfig::new(), BearerToken::new(token))?;

    match store.retrieve(&Location::new(spreadsheet_id, range)).await? {
        Some(rows) => {
            for row in rows {
                println!("{}", row);
            }
        }
        None => println!("No values in range"),
    }

    Ok(())
}
