//! Imports `name,email` rows from a CSV file into a SQLite table, then lists what was stored.
//!
//! Usage: csv_import [CSV_PATH]

use record_pipeline::app::report::{listing_from_sink, ListingLayout};
use record_pipeline::infra::{config, logging};
use record_pipeline::{CsvSource, PipelineError, RecordPipeline, RecordSink, SqliteSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init("info");

    let csv_path = std::env::args().nth(1).unwrap_or_else(config::csv_path);
    let database_url = config::users_database_url();

    let sink = SqliteSink::connect(&database_url, &config::users_table()).await?;
    tracing::info!(%database_url, table = sink.table(), "connected to database");

    let outcome = import(&sink, &csv_path).await;

    // Verification read-back runs even when the import stopped early.
    println!("\nVerifying stored users:");
    match listing_from_sink(&sink, None, &ListingLayout::users()).await {
        Ok(listing) => print!("{}", listing),
        Err(e) => eprintln!("Could not read back users: {}", e),
    }

    sink.close().await;
    tracing::info!("database connection closed");
    outcome
}

async fn import(sink: &SqliteSink, csv_path: &str) -> anyhow::Result<()> {
    sink.initialize().await?;
    tracing::info!(table = sink.table(), "table is ready");

    let mut source = CsvSource::new(csv_path);
    match RecordPipeline::new(sink).run_source(&mut source).await {
        Ok(report) => {
            println!("Data successfully imported from '{}': {}", csv_path, report);
            Ok(())
        }
        Err(PipelineError::SourceIo(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("CSV file not found: {}", csv_path);
            Err(e.into())
        }
        Err(e) => {
            eprintln!("Import failed: {}", e);
            Err(e.into())
        }
    }
}
