pub mod pipeline;
pub mod report;
pub mod stats;

pub use pipeline::{RecordPipeline, RunReport};
pub use report::{listing_from_sink, render_listing, truncate, ListingLayout};
pub use stats::Summary;
