//! Books application: serve generated books, fetch them over HTTP, persist them in
//! SQLite and print a verification listing.

use record_pipeline::app::report::{listing_from_sink, ListingLayout};
use record_pipeline::app::Summary;
use record_pipeline::infra::{config, logging};
use record_pipeline::transport::http::{AppState, Catalog, RecordServer};
use record_pipeline::{ApiSource, RecordGenerator, RecordPipeline, RecordSink, SqliteSink, Vocabulary};
use std::time::Duration;

const BANNER_WIDTH: usize = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init("info");

    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("  Books Application");
    println!("{}", "=".repeat(BANNER_WIDTH));

    // --- [1/4] Record server ---
    println!("\n[1/4] Starting API server...");
    let count = config::generated_record_count()?;
    let catalog = Catalog::from_candidates(
        RecordGenerator::new(Vocabulary::books(), count).generate(count),
    );
    let server = RecordServer::start(&config::bind_addr(), AppState::new(catalog)).await?;
    server.wait_ready(config::server_ready_timeout()?).await?;
    println!("> API server running at {}", server.base_url());

    // --- [2/4] Database ---
    println!("\n[2/4] Setting up database...");
    let sink = match SqliteSink::connect(&config::database_url(), &config::records_table()).await {
        Ok(sink) => sink,
        Err(e) => {
            stop(server).await;
            return Err(e.into());
        }
    };

    let outcome = run(&sink, &server).await;

    // Release the store and stop the server on every path.
    sink.close().await;
    stop(server).await;
    outcome?;

    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("  Application completed successfully!");
    println!("{}", "=".repeat(BANNER_WIDTH));
    Ok(())
}

async fn stop(server: RecordServer) {
    if let Err(e) = server.shutdown(Duration::from_secs(5)).await {
        tracing::warn!(error = %e, "record server shutdown failed");
    }
}

async fn run(sink: &SqliteSink, server: &RecordServer) -> anyhow::Result<()> {
    sink.initialize().await?;
    // Fresh run: drop records from previous runs.
    sink.clear().await?;
    println!("> Database ready");

    // --- [3/4] Fetch ---
    println!("\n[3/4] Fetching books from API...");
    let url = config::api_url().unwrap_or_else(|| format!("{}/records", server.base_url()));
    let mut source = ApiSource::new(url, config::fetch_timeout()?)?;

    // --- [4/4] Persist + verify ---
    println!("\n[4/4] Storing books in database...");
    let pipeline = RecordPipeline::new(sink);
    let result = pipeline.run_source(&mut source).await;
    match &result {
        Ok(report) => println!("> Fetched {} books, {}", report.candidates, report),
        Err(e) => eprintln!("> Run aborted: {}", e),
    }

    println!("\nBooks in Database:");
    match listing_from_sink(sink, Some(config::display_limit()?), &ListingLayout::books()).await {
        Ok(listing) => print!("{}", listing),
        Err(e) => eprintln!("> Could not read back records: {}", e),
    }
    match sink.fetch_all(None).await {
        Ok(records) => {
            if let Some(summary) = Summary::of_records(&records) {
                println!("Publication year: {}", summary);
            }
        }
        Err(e) => eprintln!("> Could not compute publication year summary: {}", e),
    }

    result?;
    Ok(())
}
