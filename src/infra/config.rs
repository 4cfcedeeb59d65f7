//! Centralized configuration (environment variables + defaults).
//!
//! Binaries call `dotenv::dotenv().ok()` first, so values may also come from a `.env` file.

use anyhow::Context;
use std::str::FromStr;
use std::time::Duration;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses `key` if set; a value that does not parse is an error, not a silent default.
fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} must be a valid number (got '{}')", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Durable store for the books flow.
pub fn database_url() -> String {
    env_or("DATABASE_URL", "sqlite://books.db")
}

/// Table holding the books flow's accepted records.
pub fn records_table() -> String {
    env_or("RECORDS_TABLE", "records")
}

/// Explicit record endpoint; when unset the books flow targets its own server.
pub fn api_url() -> Option<String> {
    std::env::var("RECORDS_API_URL").ok()
}

/// Address the record server binds to.
pub fn bind_addr() -> String {
    env_or("BIND_ADDR", "127.0.0.1:5000")
}

/// Timeout of the single GET against the record endpoint.
pub fn fetch_timeout() -> anyhow::Result<Duration> {
    env_parse("FETCH_TIMEOUT_SECS", 10u64).map(Duration::from_secs)
}

/// Bound on waiting for the record server to accept connections.
pub fn server_ready_timeout() -> anyhow::Result<Duration> {
    env_parse("SERVER_READY_TIMEOUT_SECS", 5u64).map(Duration::from_secs)
}

/// Number of records the server generates at startup.
pub fn generated_record_count() -> anyhow::Result<usize> {
    env_parse("GENERATED_RECORD_COUNT", 100usize)
}

/// Rows shown by the books listing.
pub fn display_limit() -> anyhow::Result<u32> {
    env_parse("DISPLAY_LIMIT", 20u32)
}

/// Input file of the CSV importer (the first CLI argument takes precedence).
pub fn csv_path() -> String {
    env_or("CSV_PATH", "users.csv")
}

pub fn users_database_url() -> String {
    env_or("USERS_DATABASE_URL", "sqlite://users.db")
}

pub fn users_table() -> String {
    env_or("USERS_TABLE", "users")
}

/// Product list used by the price report.
pub fn products_url() -> String {
    env_or("PRODUCTS_URL", "https://fakestoreapi.com/products")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test touches its own variable so they can run in parallel.

    #[test]
    fn parse_falls_back_to_default_when_unset() {
        std::env::remove_var("RECORD_PIPELINE_TEST_UNSET");
        assert_eq!(env_parse("RECORD_PIPELINE_TEST_UNSET", 7u32).unwrap(), 7);
    }

    #[test]
    fn parse_rejects_garbage() {
        std::env::set_var("RECORD_PIPELINE_TEST_GARBAGE", "ten");
        let err = env_parse("RECORD_PIPELINE_TEST_GARBAGE", 7u32).unwrap_err();
        assert!(err.to_string().contains("RECORD_PIPELINE_TEST_GARBAGE"));
    }

    #[test]
    fn parse_trims_whitespace() {
        std::env::set_var("RECORD_PIPELINE_TEST_SPACED", " 42 ");
        assert_eq!(env_parse("RECORD_PIPELINE_TEST_SPACED", 0u64).unwrap(), 42);
    }
}
