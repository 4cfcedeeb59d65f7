//! Fetches product prices, prints their average and a per-item bar listing.

use record_pipeline::app::report::render_bars;
use record_pipeline::app::Summary;
use record_pipeline::infra::{config, logging};
use record_pipeline::source::ProductSource;

const LABEL_WIDTH: usize = 20;
const BAR_WIDTH: usize = 40;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init("info");

    let url = config::products_url();
    let source = ProductSource::new(&url, config::fetch_timeout()?)?;
    let products = match source.fetch().await {
        Ok(products) => products,
        Err(e) => {
            eprintln!("Error fetching data from API: {}", e);
            return Ok(());
        }
    };

    let Some(summary) = Summary::from_values(products.iter().map(|p| p.price)) else {
        println!("No prices found.");
        return Ok(());
    };

    println!("Average price: {:.2}", summary.mean);
    println!("Prices: {}\n", summary);

    let items: Vec<(String, f64)> = products.into_iter().map(|p| (p.title, p.price)).collect();
    print!("{}", render_bars(&items, Some(summary.mean), LABEL_WIDTH, BAR_WIDTH));
    Ok(())
}
